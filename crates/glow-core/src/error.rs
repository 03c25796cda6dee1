// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Glow storefront.
//!
//! [`FetchError`] is the failure taxonomy of the upstream catalog fetch path.
//! The query façade absorbs every variant and downgrades to a lower-freshness
//! data source, so none of them reach an HTTP client directly.

use std::time::Duration;

use thiserror::Error;

/// Outcome of a single failed upstream attempt, before retry policy is applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    /// The attempt exceeded its time bound and was aborted.
    #[error("attempt timed out")]
    Timeout,

    /// DNS resolution or TCP connect failed. Treated as systemic.
    #[error("endpoint unreachable: {0}")]
    Unreachable(String),

    /// The upstream answered with a non-2xx status.
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Any other transport failure (reset connection, truncated body, ...).
    #[error("{0}")]
    Other(String),
}

/// Failure of the resilient upstream fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Too many recent failures; no network call was attempted.
    #[error("circuit breaker is open after {failures} failures, retry in {retry_after:?}")]
    CircuitOpen { failures: u32, retry_after: Duration },

    /// A single attempt exceeded the request timeout.
    #[error("request timed out after {duration:?}")]
    Timeout { duration: Duration },

    /// Connection refused or host not found. Never retried.
    #[error("API endpoint unreachable: {message}")]
    NetworkUnreachable { message: String },

    /// Recoverable errors persisted through every retry.
    #[error("failed to fetch after {retries} retries: {last_error}")]
    FetchExhausted { retries: u32, last_error: String },

    /// The upstream payload was not a JSON array of records.
    #[error("invalid data format received from API: {0}")]
    InvalidFormat(String),
}

/// The primary error type shared by the store, gateway, and binary.
#[derive(Debug, Error)]
pub enum GlowError {
    /// Configuration errors (invalid TOML, bad values, unusable settings).
    #[error("configuration error: {0}")]
    Config(String),

    /// Upstream fetch failures that escaped the degradation ladder.
    #[error("upstream error: {0}")]
    Upstream(#[from] FetchError),

    /// Local key-value store failures.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A product, brand, or cart item does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Caller supplied an unusable value.
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GlowError {
    /// Shorthand for a [`GlowError::NotFound`].
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}
