// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seam traits for the Glow storefront.
//!
//! All traits use `#[async_trait]` so implementations can be held as
//! trait objects behind `Arc`.

pub mod adapter;
pub mod transport;

pub use adapter::PluginAdapter;
pub use transport::UpstreamTransport;
