// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::{MatchedPath, Request};
use axum::middleware::{self as axum_middleware, Next};
use axum::response::Response;
use axum::routing::{delete, get, patch, post};
use glow_catalog::CatalogService;
use glow_config::model::ServerConfig;
use glow_core::GlowError;
use glow_store::LocalStore;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::{cart, handlers};

/// State for the unauthenticated health and metrics endpoints.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: Instant,
    /// Prometheus render function; `None` when metrics are disabled.
    pub prometheus_render: Option<Arc<dyn Fn() -> String + Send + Sync>>,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub catalog: Arc<CatalogService>,
    pub store: Arc<LocalStore>,
    pub health: HealthState,
}

impl GatewayState {
    pub fn new(catalog: Arc<CatalogService>, store: Arc<LocalStore>) -> Self {
        Self {
            catalog,
            store,
            health: HealthState {
                start_time: Instant::now(),
                prometheus_render: None,
            },
        }
    }

    pub fn with_metrics(mut self, render: Arc<dyn Fn() -> String + Send + Sync>) -> Self {
        self.health.prometheus_render = Some(render);
        self
    }
}

/// Build the application router.
///
/// `cors_permissive` allows any origin; otherwise only same-origin requests
/// pass the browser's CORS checks.
pub fn router(state: GatewayState, cors_permissive: bool) -> Router {
    let catalog_routes = Router::new()
        .route("/products", get(handlers::get_products))
        .route("/api/products", get(handlers::get_products))
        .route("/products/stats", get(handlers::get_product_stats))
        .route("/products/{id}", get(handlers::get_product))
        .route("/brands/{slug}", get(handlers::get_brand));

    let store_routes = Router::new()
        .route("/cart", get(cart::get_cart).delete(cart::clear_cart))
        .route("/cart/items", post(cart::add_cart_item))
        .route(
            "/cart/items/{id}",
            patch(cart::update_cart_item).delete(cart::remove_cart_item),
        )
        .route("/wishlist", get(cart::get_wishlist).post(cart::add_wishlist_item))
        .route("/wishlist/{id}", delete(cart::remove_wishlist_item));

    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .route("/metrics", get(handlers::get_metrics));

    let cors = if cors_permissive {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    Router::new()
        .merge(catalog_routes)
        .merge(store_routes)
        .merge(public_routes)
        .with_state(state)
        .layer(axum_middleware::from_fn(track_requests))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Record request count and latency per matched route.
async fn track_requests(request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let started = Instant::now();
    let response = next.run(request).await;
    glow_prometheus::record_http_request(
        &route,
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );
    response
}

/// Bind the configured address and serve until `shutdown` is cancelled.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), GlowError> {
    let app = router(state, config.cors_permissive);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| GlowError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| GlowError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("gateway stopped");
    Ok(())
}
