// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Glow workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Fully operational.
    Healthy,
    /// Operational but serving degraded data.
    Degraded(String),
    /// Not operational.
    Unhealthy(String),
}

impl HealthStatus {
    /// Short label used in JSON health payloads.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "ok",
            Self::Degraded(_) => "degraded",
            Self::Unhealthy(_) => "unhealthy",
        }
    }

    /// Detail message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Healthy => None,
            Self::Degraded(msg) | Self::Unhealthy(msg) => Some(msg),
        }
    }
}

/// Circuit breaker position as observed by callers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CircuitState {
    /// Calls flow through to the upstream.
    Closed,
    /// Calls fail fast with `CircuitOpen`.
    Open,
}

/// Which rung of the degradation ladder produced a catalog response.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FreshnessSource {
    /// Fetched from the upstream during this query.
    Fresh,
    /// Served from the cache inside the fresh window.
    Cache,
    /// Served from the cache past the fresh window after a failed fetch.
    Stale,
    /// Served from the built-in fallback set.
    Fallback,
}

impl FreshnessSource {
    /// Whether data from this source must be flagged as degraded.
    pub fn is_stale(self) -> bool {
        matches!(self, Self::Stale | Self::Fallback)
    }
}
