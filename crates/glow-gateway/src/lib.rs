// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Glow storefront.
//!
//! Exposes the catalog query facade, the cart and wishlist store, health,
//! and Prometheus metrics over axum.

pub mod cart;
pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ErrorResponse};
pub use server::{GatewayState, HealthState, router, start_server};
