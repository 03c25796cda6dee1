// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait for long-lived components that report health.

use async_trait::async_trait;

use crate::error::GlowError;
use crate::types::HealthStatus;

/// A named component with a health check and an orderly shutdown.
///
/// Implemented by the catalog service and the local store so the gateway's
/// `/health` endpoint can report on both uniformly.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this component.
    fn name(&self) -> &str;

    /// Performs a health check and returns the current status.
    async fn health_check(&self) -> Result<HealthStatus, GlowError>;

    /// Releases held resources.
    async fn shutdown(&self) -> Result<(), GlowError>;
}
