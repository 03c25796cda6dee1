// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./glow.toml` > `~/.config/glow/glow.toml` > `/etc/glow/glow.toml`,
//! with environment variable overrides via the `GLOW_` prefix.

// figment::Error is external and cannot be boxed without a wrapper.
#![allow(clippy::result_large_err)]

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::GlowConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/glow/glow.toml";

/// Local configuration file, relative to the working directory.
pub const LOCAL_CONFIG_FILE: &str = "glow.toml";

/// Sections recognised when mapping `GLOW_*` variables to dotted keys.
const ENV_SECTIONS: &[&str] = &[
    "server",
    "upstream",
    "resilience",
    "cache",
    "store",
    "metrics",
];

/// Path of the per-user configuration file, if a config dir is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("glow").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/glow/glow.toml`
/// 3. `~/.config/glow/glow.toml`
/// 4. `./glow.toml`
/// 5. `GLOW_*` environment variables
pub fn load_config() -> Result<GlowConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<GlowConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GlowConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<GlowConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GlowConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for hierarchical loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(GlowConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Environment provider mapping `GLOW_<SECTION>_<KEY>` to `section.key`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `GLOW_UPSTREAM_TIMEOUT_SECS` maps to `upstream.timeout_secs` rather than
/// `upstream.timeout.secs`.
fn env_provider() -> Env {
    Env::prefixed("GLOW_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a prefix-stripped env key, in any case, to its dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_split_on_section_only() {
        assert_eq!(map_env_key("upstream_timeout_secs"), "upstream.timeout_secs");
        assert_eq!(map_env_key("cache_single_flight"), "cache.single_flight");
        assert_eq!(
            map_env_key("resilience_failure_threshold"),
            "resilience.failure_threshold"
        );
        assert_eq!(map_env_key("store_database_path"), "store.database_path");
    }

    #[test]
    fn env_keys_are_matched_case_insensitively() {
        assert_eq!(map_env_key("UPSTREAM_TIMEOUT_SECS"), "upstream.timeout_secs");
        assert_eq!(map_env_key("Server_Port"), "server.port");
    }

    #[test]
    fn unknown_sections_pass_through() {
        assert_eq!(map_env_key("bogus_key"), "bogus_key");
    }

    #[test]
    fn env_override_via_jail() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("GLOW_UPSTREAM_TIMEOUT_SECS", "5");
            jail.set_env("GLOW_CACHE_SINGLE_FLIGHT", "true");
            let config: GlowConfig = Figment::new()
                .merge(Serialized::defaults(GlowConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.upstream.timeout_secs, 5);
            assert!(config.cache.single_flight);
            Ok(())
        });
    }

    #[test]
    fn file_load_applies_env_overrides() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("glow.toml", "[server]\nport = 4000\n")?;
            jail.set_env("GLOW_UPSTREAM_TIMEOUT_SECS", "5");
            jail.set_env("GLOW_SERVER_LOG_LEVEL", "debug");
            let config = load_config_from_path(Path::new("glow.toml"))?;
            assert_eq!(config.server.port, 4000);
            assert_eq!(config.server.log_level, "debug");
            assert_eq!(config.upstream.timeout_secs, 5);
            Ok(())
        });
    }
}
