// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-attempt upstream transport.

use async_trait::async_trait;

use crate::error::AttemptError;

/// Performs exactly one GET against the upstream catalog.
///
/// Implementations never retry and never touch circuit breaker state. They
/// only classify failures into [`AttemptError`].
#[async_trait]
pub trait UpstreamTransport: Send + Sync + 'static {
    /// Fetch the raw response body from `url`.
    async fn get(&self, url: &str) -> Result<String, AttemptError>;
}
