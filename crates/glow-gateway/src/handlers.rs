// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog, health, and metrics handlers.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use glow_catalog::{BrandAggregate, CatalogResponse, CatalogStats, Product, ProductFilter};
use glow_core::PluginAdapter;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ApiError;
use crate::server::GatewayState;

/// Query string of the product endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub brand: Option<String>,
    pub category: Option<String>,
    pub product_type: Option<String>,
    /// Free-text search.
    pub q: Option<String>,
    /// Comma-separated tags, all required.
    pub tags: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ProductQuery {
    pub fn into_filter(self) -> ProductFilter {
        ProductFilter {
            brand: self.brand,
            category: self.category,
            product_type: self.product_type,
            search: self.q,
            tags: self
                .tags
                .map(|t| {
                    t.split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}

/// GET /products and GET /api/products
pub async fn get_products(
    State(state): State<GatewayState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let Query(query) = query?;
    let response = state.catalog.get_products(&query.into_filter()).await?;
    Ok(Json(response))
}

/// GET /products/stats
pub async fn get_product_stats(
    State(state): State<GatewayState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<CatalogStats>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.catalog.stats(&query.into_filter()).await?))
}

/// GET /products/{id}
pub async fn get_product(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.catalog.product_by_id(&id).await?))
}

/// GET /brands/{slug}
pub async fn get_brand(
    State(state): State<GatewayState>,
    Path(slug): Path<String>,
) -> Result<Json<BrandAggregate>, ApiError> {
    Ok(Json(state.catalog.brand_by_slug(&slug).await?))
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub version: &'static str,
    pub uptime_secs: u64,
    pub circuit: serde_json::Value,
    pub cache: serde_json::Value,
    pub store: &'static str,
}

/// GET /health
///
/// 200 while the catalog can answer (possibly degraded), 503 when the store
/// is unusable.
pub async fn get_health(State(state): State<GatewayState>) -> Response {
    let catalog = state.catalog.health().await;
    let status = catalog.status();
    let store_ok = state.store.health_check().await.is_ok();

    let body = HealthResponse {
        status: if store_ok { status.label() } else { "unhealthy" },
        detail: status.detail().map(str::to_string),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
        circuit: catalog.breaker.to_json(),
        cache: json!({
            "populated": catalog.cache.populated,
            "ageSecs": catalog.cache.age.map(|a| a.as_secs()),
            "isStale": catalog.cache.is_stale,
        }),
        store: if store_ok { "ok" } else { "unhealthy" },
    };

    let code = if store_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(body)).into_response()
}

/// GET /metrics
pub async fn get_metrics(State(state): State<GatewayState>) -> Response {
    match &state.health.prometheus_render {
        Some(render) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4")],
            render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics disabled").into_response(),
    }
}
