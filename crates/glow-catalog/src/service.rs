// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query facade over the catalog.
//!
//! Every read goes through one degradation ladder:
//! fresh cache → upstream fetch → stale cache → built-in fallback set.
//! Upstream failures never reach the caller; the only error a query can
//! return is an unusable fallback set.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use glow_config::GlowConfig;
use glow_core::{
    CircuitState, FetchError, FreshnessSource, GlowError, HealthStatus, PluginAdapter,
    UpstreamTransport,
};
use glow_resilience::{BreakerSnapshot, ResilientFetcher};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::aggregate::{self, BrandAggregate, PriceRange, ProductStats};
use crate::cache::{CacheEntry, CacheStatus, FreshnessCache};
use crate::fallback::fallback_products;
use crate::filter::{ProductFilter, filter_products};
use crate::model::Product;
use crate::normalize::normalize;

/// The product set chosen for one query, before filtering.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub products: Arc<Vec<Product>>,
    pub source: FreshnessSource,
    /// When the data was fetched upstream; `None` for the fallback set.
    pub fetched_at: Option<DateTime<Utc>>,
}

impl CatalogSnapshot {
    pub fn is_stale(&self) -> bool {
        self.source.is_stale()
    }
}

/// Body of a successful product query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub products: Vec<Product>,
    pub brands: Vec<BrandAggregate>,
    pub categories: Vec<String>,
    pub product_types: Vec<String>,
    pub total: usize,
    pub timestamp: DateTime<Utc>,
    pub is_stale: bool,
    pub source: FreshnessSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Body of a statistics query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub stats: ProductStats,
    pub price_range: Option<PriceRange>,
    pub tags: Vec<String>,
    pub is_stale: bool,
    pub source: FreshnessSource,
}

/// Breaker and cache state together.
#[derive(Debug, Clone, Copy)]
pub struct CatalogHealth {
    pub breaker: BreakerSnapshot,
    pub cache: CacheStatus,
}

impl CatalogHealth {
    pub fn status(&self) -> HealthStatus {
        if self.breaker.state == CircuitState::Open {
            HealthStatus::Degraded(format!(
                "circuit open after {} upstream failures",
                self.breaker.failures
            ))
        } else if self.cache.is_stale {
            HealthStatus::Degraded("serving stale catalog data".to_string())
        } else {
            HealthStatus::Healthy
        }
    }
}

pub struct CatalogService {
    fetcher: ResilientFetcher,
    cache: FreshnessCache,
    upstream_url: String,
    /// Serializes refreshes when single-flight is enabled.
    refresh_lock: Option<Mutex<()>>,
}

impl CatalogService {
    pub fn new(
        fetcher: ResilientFetcher,
        cache: FreshnessCache,
        upstream_url: impl Into<String>,
        single_flight: bool,
    ) -> Self {
        Self {
            fetcher,
            cache,
            upstream_url: upstream_url.into(),
            refresh_lock: single_flight.then(|| Mutex::new(())),
        }
    }

    pub fn from_config(transport: Arc<dyn UpstreamTransport>, config: &GlowConfig) -> Self {
        Self::new(
            ResilientFetcher::from_config(transport, config),
            FreshnessCache::from_config(&config.cache),
            config.upstream.url.clone(),
            config.cache.single_flight,
        )
    }

    /// Pick the product set for a query by walking the degradation ladder.
    pub async fn snapshot(&self) -> Result<CatalogSnapshot, GlowError> {
        if let Some(entry) = self.cache.fresh().await {
            return Ok(served(CatalogSnapshot {
                products: entry.products,
                source: FreshnessSource::Cache,
                fetched_at: Some(entry.fetched_at),
            }));
        }

        let _refresh = match &self.refresh_lock {
            Some(lock) => {
                let guard = lock.lock().await;
                // Another caller may have refreshed while this one waited.
                if let Some(entry) = self.cache.fresh().await {
                    return Ok(served(CatalogSnapshot {
                        products: entry.products,
                        source: FreshnessSource::Cache,
                        fetched_at: Some(entry.fetched_at),
                    }));
                }
                Some(guard)
            }
            None => None,
        };

        match self.refresh().await {
            Ok(entry) => Ok(served(CatalogSnapshot {
                products: entry.products,
                source: FreshnessSource::Fresh,
                fetched_at: Some(entry.fetched_at),
            })),
            Err(err) => self.degrade(err).await,
        }
    }

    async fn refresh(&self) -> Result<CacheEntry, FetchError> {
        let raw = self.fetcher.fetch(&self.upstream_url).await?;
        let products = normalize(&raw)?;
        info!(count = products.len(), "catalog refreshed from upstream");
        Ok(self.cache.store(products).await)
    }

    async fn degrade(&self, err: FetchError) -> Result<CatalogSnapshot, GlowError> {
        warn!(error = %err, "catalog refresh failed");

        if let Some(entry) = self.cache.stale().await {
            info!(age_secs = entry.age().as_secs(), "serving stale catalog data");
            return Ok(served(CatalogSnapshot {
                products: entry.products,
                source: FreshnessSource::Stale,
                fetched_at: Some(entry.fetched_at),
            }));
        }

        info!("no usable cache, serving fallback product set");
        let products = fallback_products()?;
        Ok(served(CatalogSnapshot {
            products: Arc::new(products),
            source: FreshnessSource::Fallback,
            fetched_at: None,
        }))
    }

    /// Products matching `filter`, with aggregates over the filtered set.
    pub async fn get_products(&self, filter: &ProductFilter) -> Result<CatalogResponse, GlowError> {
        let snapshot = self.snapshot().await?;
        let products = filter_products(&snapshot.products, filter);

        Ok(CatalogResponse {
            brands: aggregate::group_by_brand(&products),
            categories: aggregate::categories(&products),
            product_types: aggregate::product_types(&products),
            total: products.len(),
            timestamp: Utc::now(),
            is_stale: snapshot.is_stale(),
            source: snapshot.source,
            fetched_at: snapshot.fetched_at,
            products,
        })
    }

    pub async fn product_by_id(&self, id: &str) -> Result<Product, GlowError> {
        let snapshot = self.snapshot().await?;
        snapshot
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| GlowError::not_found("product", id))
    }

    pub async fn brand_by_slug(&self, slug: &str) -> Result<BrandAggregate, GlowError> {
        let snapshot = self.snapshot().await?;
        aggregate::group_by_brand(&snapshot.products)
            .into_iter()
            .find(|b| b.slug == slug)
            .ok_or_else(|| GlowError::not_found("brand", slug))
    }

    pub async fn stats(&self, filter: &ProductFilter) -> Result<CatalogStats, GlowError> {
        let snapshot = self.snapshot().await?;
        let products = filter_products(&snapshot.products, filter);
        Ok(CatalogStats {
            stats: aggregate::stats(&products),
            price_range: aggregate::price_range(&products),
            tags: aggregate::unique_tags(&products),
            is_stale: snapshot.is_stale(),
            source: snapshot.source,
        })
    }

    pub async fn health(&self) -> CatalogHealth {
        CatalogHealth {
            breaker: self.fetcher.breaker().snapshot(),
            cache: self.cache.status().await,
        }
    }
}

fn served(snapshot: CatalogSnapshot) -> CatalogSnapshot {
    metrics::counter!("glow_catalog_queries_total", "source" => snapshot.source.to_string())
        .increment(1);
    if let Some(fetched_at) = snapshot.fetched_at {
        let age = (Utc::now() - fetched_at).num_seconds().max(0);
        metrics::gauge!("glow_cache_age_seconds").set(age as f64);
    }
    debug!(source = %snapshot.source, count = snapshot.products.len(), "catalog query served");
    snapshot
}

#[async_trait]
impl PluginAdapter for CatalogService {
    fn name(&self) -> &str {
        "catalog"
    }

    async fn health_check(&self) -> Result<HealthStatus, GlowError> {
        Ok(self.health().await.status())
    }

    async fn shutdown(&self) -> Result<(), GlowError> {
        Ok(())
    }
}
