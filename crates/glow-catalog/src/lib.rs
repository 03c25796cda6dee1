// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Product catalog for the Glow storefront.
//!
//! Raw upstream records pass through the [`normalize`](normalize::normalize)
//! boundary into canonical [`Product`]s, are cached by the
//! [`FreshnessCache`], and are served with brand, category and type
//! aggregates by the [`CatalogService`] query facade.

pub mod aggregate;
pub mod cache;
pub mod fallback;
pub mod filter;
pub mod model;
pub mod normalize;
pub mod service;

pub use aggregate::{BrandAggregate, PriceRange, ProductStats, slugify};
pub use cache::{CacheEntry, CacheStatus, FreshnessCache};
pub use filter::{ProductFilter, filter_products};
pub use model::{Product, ProductColor};
pub use service::{CatalogHealth, CatalogResponse, CatalogService, CatalogSnapshot, CatalogStats};
