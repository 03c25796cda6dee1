// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw upstream records and configurations for tests.

use glow_config::GlowConfig;
use serde_json::{Value, json};

/// A complete raw upstream record in the shape the catalog API returns.
pub fn raw_product(id: u64, brand: &str, name: &str) -> Value {
    json!({
        "id": id,
        "brand": brand,
        "name": name,
        "price": "9.99",
        "price_sign": "$",
        "currency": "USD",
        "image_link": format!("https://cdn.example.test/{id}.jpg"),
        "product_link": format!("https://shop.example.test/p/{id}"),
        "website_link": "https://shop.example.test",
        "description": format!("{name} by {brand}"),
        "rating": 4.5,
        "category": "powder",
        "product_type": "bronzer",
        "tag_list": ["Vegan", "cruelty free"],
        "created_at": "2016-10-01T18:36:15.012Z",
        "updated_at": "2017-12-23T21:08:50.624Z",
        "product_api_url": format!("https://upstream.example.test/api/v1/products/{id}.json"),
        "api_featured_image": format!("//s3.example.test/{id}/original.jpg"),
        "product_colors": [
            { "hex_value": "#C7A08E", "colour_name": "Gold" }
        ]
    })
}

/// Override fields of a raw record in place and return it.
pub fn with_fields(mut record: Value, fields: Value) -> Value {
    if let (Some(target), Value::Object(extra)) = (record.as_object_mut(), fields) {
        target.extend(extra);
    }
    record
}

/// Serialize records as an upstream response body.
pub fn products_body(records: &[Value]) -> String {
    Value::Array(records.to_vec()).to_string()
}

/// Three well-formed records plus one missing its name.
pub fn three_valid_one_invalid() -> Vec<Value> {
    let mut invalid = raw_product(4, "nyx", "ignored");
    if let Some(obj) = invalid.as_object_mut() {
        obj.remove("name");
    }
    vec![
        raw_product(1, "maybelline", "Fit Me Bronzer"),
        with_fields(
            raw_product(2, "nyx", "Butter Gloss"),
            json!({ "category": "lip_gloss", "product_type": "lipstick", "price": "5.00" }),
        ),
        with_fields(
            raw_product(3, "Maybelline", "Lash Sensational"),
            json!({ "category": null, "product_type": "mascara", "price": "11.49" }),
        ),
        invalid,
    ]
}

/// Configuration with timings small enough for real-clock tests.
pub fn test_config(upstream_url: &str) -> GlowConfig {
    let mut config = GlowConfig::default();
    config.upstream.url = upstream_url.to_string();
    config.upstream.timeout_secs = 2;
    config.resilience.max_retries = 2;
    config.resilience.initial_backoff_ms = 10;
    config.resilience.failure_threshold = 3;
    config.store.database_path = ":memory:".to_string();
    config
}
