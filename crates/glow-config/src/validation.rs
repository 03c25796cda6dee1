// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks constraints serde attributes cannot express: parseable URLs,
//! non-zero windows, and window ordering.

use crate::diagnostic::ConfigError;
use crate::model::GlowConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns every violation found rather than stopping at the first one.
pub fn validate_config(config: &GlowConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else if host.parse::<std::net::IpAddr>().is_err()
        && !host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        fail(format!("server.host `{host}` is not a valid IP address or hostname"));
    }

    match url::Url::parse(&config.upstream.url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        Ok(parsed) => fail(format!(
            "upstream.url must use http or https, got `{}`",
            parsed.scheme()
        )),
        Err(e) => fail(format!("upstream.url `{}` is not a valid URL: {e}", config.upstream.url)),
    }

    if config.upstream.timeout_secs == 0 {
        fail("upstream.timeout_secs must be greater than 0".to_string());
    }

    if config.resilience.failure_threshold == 0 {
        fail("resilience.failure_threshold must be at least 1".to_string());
    }

    if config.cache.fresh_ttl_secs == 0 {
        fail("cache.fresh_ttl_secs must be greater than 0".to_string());
    }

    if config.cache.stale_ttl_secs < config.cache.fresh_ttl_secs {
        fail(format!(
            "cache.stale_ttl_secs ({}) must not be shorter than cache.fresh_ttl_secs ({})",
            config.cache.stale_ttl_secs, config.cache.fresh_ttl_secs
        ));
    }

    if config.store.database_path.trim().is_empty() {
        fail("store.database_path must not be empty".to_string());
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
