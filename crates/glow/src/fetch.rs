// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot catalog query from the command line.

use std::sync::Arc;

use glow_catalog::{CatalogService, ProductFilter};
use glow_config::GlowConfig;
use glow_core::GlowError;
use glow_resilience::HttpTransport;

pub fn build_filter(
    brand: Option<String>,
    category: Option<String>,
    product_type: Option<String>,
    search: Option<String>,
) -> ProductFilter {
    let mut filter = ProductFilter::default();
    if let Some(brand) = brand {
        filter = filter.brand(brand);
    }
    if let Some(category) = category {
        filter = filter.category(category);
    }
    if let Some(product_type) = product_type {
        filter = filter.product_type(product_type);
    }
    if let Some(search) = search {
        filter = filter.search(search);
    }
    filter
}

/// Run a single query through the full fetch pipeline and print it.
///
/// Degraded answers (stale cache or static fallback) still print; the
/// `source` and `isStale` fields say which rung served them.
pub async fn run_fetch(
    config: GlowConfig,
    filter: ProductFilter,
    stats: bool,
) -> Result<(), GlowError> {
    let transport = Arc::new(HttpTransport::new(&config.upstream)?);
    let catalog = CatalogService::from_config(transport, &config);

    let json = if stats {
        serde_json::to_string_pretty(&catalog.stats(&filter).await?)
    } else {
        serde_json::to_string_pretty(&catalog.get_products(&filter).await?)
    }
    .map_err(|e| GlowError::Internal(format!("failed to encode response: {e}")))?;

    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_filter_sets_only_given_fields() {
        let filter = build_filter(Some("nyx".into()), None, None, Some("gloss".into()));
        assert_eq!(filter.brand.as_deref(), Some("nyx"));
        assert_eq!(filter.search.as_deref(), Some("gloss"));
        assert!(filter.category.is_none());
        assert!(filter.product_type.is_none());
    }

    #[test]
    fn build_filter_without_arguments_is_empty() {
        assert!(build_filter(None, None, None, None).is_empty());
    }
}
