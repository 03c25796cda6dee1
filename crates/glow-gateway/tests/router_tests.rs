// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use glow_catalog::{CatalogService, FreshnessCache};
use glow_core::AttemptError;
use glow_gateway::{GatewayState, router};
use glow_resilience::{BackoffPolicy, CircuitBreaker, ResilientFetcher};
use glow_store::{Database, LocalStore};
use glow_test_utils::fixtures::{products_body, three_valid_one_invalid};
use glow_test_utils::{Scripted, ScriptedTransport};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app_with(transport: Arc<ScriptedTransport>) -> Router {
    let fetcher = ResilientFetcher::new(
        transport,
        Arc::new(CircuitBreaker::new(5, Duration::from_secs(300))),
        BackoffPolicy::none(),
        Duration::from_secs(5),
    );
    let catalog = CatalogService::new(
        fetcher,
        FreshnessCache::new(Duration::from_secs(3600), Duration::from_secs(86_400)),
        "http://upstream.test/products.json",
        false,
    );
    let store = LocalStore::new(Database::open(":memory:").await.unwrap());
    let state = GatewayState::new(Arc::new(catalog), Arc::new(store))
        .with_metrics(Arc::new(|| "# glow metrics\n".to_string()));
    router(state, true)
}

async fn app() -> Router {
    let body = products_body(&three_valid_one_invalid());
    app_with(Arc::new(ScriptedTransport::always(Scripted::Body(body)))).await
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

async fn patch(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PATCH, uri, Some(body)).await
}

async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

#[tokio::test]
async fn products_endpoint_returns_catalog_contract() {
    let app = app().await;
    let (status, body) = get(&app, "/products").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["products"].as_array().unwrap().len(), 3);
    assert_eq!(body["brands"].as_array().unwrap().len(), 2);
    assert_eq!(body["categories"], json!(["powder", "lip_gloss", "Uncategorized"]));
    assert_eq!(body["productTypes"], json!(["bronzer", "lipstick", "mascara"]));
    assert_eq!(body["isStale"], false);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn api_alias_and_filters() {
    let app = app().await;
    let (status, body) = get(&app, "/api/products?brand=MAYBELLINE&product_type=mascara").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["products"][0]["id"], "3");

    let (_, body) = get(&app, "/products?q=gloss").await;
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn unreachable_upstream_serves_fallback_flagged_stale() {
    let transport = Arc::new(ScriptedTransport::always(Scripted::Fail(
        AttemptError::Unreachable("dns failure".into()),
    )));
    let app = app_with(transport).await;

    let (status, body) = get(&app, "/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isStale"], true);
    assert_eq!(body["source"], "fallback");
    assert!(
        body["products"]
            .as_array()
            .unwrap()
            .iter()
            .any(|p| p["id"] == "495")
    );
}

#[tokio::test]
async fn product_and_brand_lookups() {
    let app = app().await;
    let (status, body) = get(&app, "/products/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Butter Gloss");

    let (status, body) = get(&app, "/products/404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], true);
    assert!(body["message"].as_str().unwrap().contains("404"));

    let (status, body) = get(&app, "/brands/maybelline").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["productCount"], 2);
}

#[tokio::test]
async fn stats_endpoint() {
    let app = app().await;
    let (status, body) = get(&app, "/products/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["totalProducts"], 3);
    assert_eq!(body["priceRange"]["min"], 5.0);
    assert_eq!(body["tags"], json!(["cruelty free", "vegan"]));
}

#[tokio::test]
async fn malformed_price_filter_returns_json_error() {
    let app = app().await;
    for uri in ["/products?min_price=cheap", "/products/stats?max_price=lots"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], true);
        assert!(body["message"].as_str().unwrap().contains("query string"), "{body}");
        assert!(body["timestamp"].is_string());
    }
}

#[tokio::test]
async fn malformed_cart_body_returns_json_error() {
    let app = app().await;
    let (status, body) = patch(&app, "/cart/items/1", json!({"quantity": "many"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn cart_flow() {
    let app = app().await;

    let (status, cart) = post(&app, "/cart/items", json!({"product_id": "1"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["itemCount"], 1);

    post(&app, "/cart/items", json!({"product_id": "1"})).await;
    let (_, cart) = post(&app, "/cart/items", json!({"product_id": "2"})).await;
    assert_eq!(cart["itemCount"], 3);
    assert_eq!(cart["subtotal"], "24.98");

    let (status, cart) = patch(&app, "/cart/items/2", json!({"quantity": 4})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["itemCount"], 6);

    let (status, _) = patch(&app, "/cart/items/2", json!({"quantity": 500})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = patch(&app, "/cart/items/99", json!({"quantity": 1})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, cart) = delete(&app, "/cart/items/1").await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);

    let (_, cart) = delete(&app, "/cart").await;
    assert_eq!(cart["itemCount"], 0);

    let (status, _) = post(&app, "/cart/items", json!({"product_id": "nope"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wishlist_flow() {
    let app = app().await;
    post(&app, "/wishlist", json!({"product_id": "3"})).await;
    let (status, list) = post(&app, "/wishlist", json!({"product_id": "3"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["count"], 1);

    let (_, list) = get(&app, "/wishlist").await;
    assert_eq!(list["items"][0]["id"], "3");

    let (_, list) = delete(&app, "/wishlist/3").await;
    assert_eq!(list["count"], 0);
}

#[tokio::test]
async fn health_reports_circuit_and_cache() {
    let app = app().await;
    get(&app, "/products").await;

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["circuit"]["state"], "closed");
    assert_eq!(body["cache"]["populated"], true);
    assert_eq!(body["store"], "ok");
}

#[tokio::test]
async fn metrics_endpoint_renders_text() {
    let app = app().await;
    let request = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"# glow metrics\n");
}
