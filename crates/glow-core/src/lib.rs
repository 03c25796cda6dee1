// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Glow storefront.
//!
//! Provides the error taxonomy, common types, and the seam traits that the
//! resilience, catalog, store, and gateway crates build on.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{AttemptError, FetchError, GlowError};
pub use traits::{PluginAdapter, UpstreamTransport};
pub use types::{CircuitState, FreshnessSource, HealthStatus};
