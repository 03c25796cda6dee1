// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resilience layer for upstream catalog fetches.
//!
//! [`ResilientFetcher`] wraps an [`UpstreamTransport`](glow_core::UpstreamTransport)
//! with a [`CircuitBreaker`], per-attempt timeouts, and a [`BackoffPolicy`].
//! [`HttpTransport`] is the production transport.

pub mod backoff;
pub mod breaker;
pub mod fetcher;
pub mod http;

pub use backoff::BackoffPolicy;
pub use breaker::{BreakerSnapshot, CircuitBreaker};
pub use fetcher::ResilientFetcher;
pub use http::HttpTransport;
