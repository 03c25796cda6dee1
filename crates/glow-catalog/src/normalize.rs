// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maps untrusted upstream records onto the canonical [`Product`] shape.
//!
//! A record survives only if it is an object with non-empty `brand`, `name`
//! and `image_link`. Every other field falls back to a fixed default, so the
//! output is a pure function of the input.

use std::collections::HashSet;

use glow_core::FetchError;
use serde_json::{Map, Value};
use tracing::debug;

use crate::aggregate::slugify;
use crate::model::{Product, ProductColor};

pub const DEFAULT_PRICE: &str = "0.00";
pub const DEFAULT_PRICE_SIGN: &str = "$";
pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_DESCRIPTION: &str = "No description available";
pub const DEFAULT_CATEGORY: &str = "Uncategorized";
pub const DEFAULT_PRODUCT_TYPE: &str = "other";

/// Normalize an upstream payload.
///
/// Fails with [`FetchError::InvalidFormat`] unless `raw` is a JSON array.
/// Invalid entries are dropped; when two entries share an id the first wins.
pub fn normalize(raw: &Value) -> Result<Vec<Product>, FetchError> {
    let Value::Array(records) = raw else {
        return Err(FetchError::InvalidFormat(format!(
            "expected an array of products, got {}",
            kind_of(raw)
        )));
    };

    let mut seen = HashSet::with_capacity(records.len());
    let mut products = Vec::with_capacity(records.len());
    for record in records {
        let Some(product) = normalize_record(record) else {
            continue;
        };
        if seen.insert(product.id.clone()) {
            products.push(product);
        }
    }

    let dropped = records.len() - products.len();
    if dropped > 0 {
        debug!(
            received = records.len(),
            kept = products.len(),
            dropped,
            "discarded invalid or duplicate upstream records"
        );
    }
    Ok(products)
}

/// Normalize a single record, or `None` if it lacks brand, name or image.
pub fn normalize_record(record: &Value) -> Option<Product> {
    let obj = record.as_object()?;
    let brand = text(obj, "brand")?;
    let name = text(obj, "name")?;
    let image_link = text(obj, "image_link")?;

    let id = text(obj, "id").unwrap_or_else(|| format!("{}-{}", slugify(&brand), slugify(&name)));

    Some(Product {
        id,
        price: text_or(obj, "price", DEFAULT_PRICE),
        price_sign: text_or(obj, "price_sign", DEFAULT_PRICE_SIGN),
        currency: text_or(obj, "currency", DEFAULT_CURRENCY),
        product_link: text_or(obj, "product_link", ""),
        website_link: text_or(obj, "website_link", ""),
        description: text_or(obj, "description", DEFAULT_DESCRIPTION),
        rating: rating(obj.get("rating")),
        category: text_or(obj, "category", DEFAULT_CATEGORY),
        product_type: text_or(obj, "product_type", DEFAULT_PRODUCT_TYPE),
        tag_list: tags(obj.get("tag_list")),
        created_at: text(obj, "created_at"),
        updated_at: text(obj, "updated_at"),
        product_api_url: text_or(obj, "product_api_url", ""),
        api_featured_image: text_or(obj, "api_featured_image", ""),
        product_colors: colors(obj.get("product_colors")),
        brand,
        name,
        image_link,
    })
}

/// Non-empty string, or a number rendered as a string.
fn text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_or(obj: &Map<String, Value>, key: &str, default: &str) -> String {
    text(obj, key).unwrap_or_else(|| default.to_string())
}

/// Zero, out-of-range and non-numeric ratings collapse to `None`.
fn rating(value: Option<&Value>) -> Option<f64> {
    let rating = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (rating.is_finite() && rating > 0.0 && rating <= 5.0).then_some(rating)
}

fn tags(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|t| t.as_str())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn colors(value: Option<&Value>) -> Vec<ProductColor> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|c| ProductColor {
            hex_value: text_or(c, "hex_value", ""),
            colour_name: text_or(c, "colour_name", ""),
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glow_test_utils::fixtures::{raw_product, three_valid_one_invalid, with_fields};
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn rejects_non_array_payload() {
        let err = normalize(&json!({"products": []})).unwrap_err();
        match err {
            FetchError::InvalidFormat(msg) => assert!(msg.contains("an object"), "got: {msg}"),
            other => panic!("expected InvalidFormat, got {other:?}"),
        }
    }

    #[test]
    fn drops_records_missing_required_fields() {
        let products = normalize(&Value::Array(three_valid_one_invalid())).unwrap();
        assert_eq!(products.len(), 3);
        assert!(products.iter().all(|p| p.id != "4"));
    }

    #[test]
    fn each_required_field_is_enforced() {
        for field in ["brand", "name", "image_link"] {
            let mut record = raw_product(1, "nyx", "Gloss");
            record.as_object_mut().unwrap().remove(field);
            assert!(normalize_record(&record).is_none(), "{field} missing");

            let blank = with_fields(raw_product(1, "nyx", "Gloss"), json!({ field: "" }));
            assert!(normalize_record(&blank).is_none(), "{field} empty");
        }
        assert!(normalize_record(&json!("not an object")).is_none());
        assert!(normalize_record(&Value::Null).is_none());
    }

    #[test]
    fn fills_defaults_for_missing_optional_fields() {
        let product = normalize_record(&json!({
            "id": 7,
            "brand": "nyx",
            "name": "Butter Gloss",
            "image_link": "https://cdn.example.test/7.jpg",
            "price": null,
            "rating": "",
            "category": "",
            "tag_list": "vegan",
            "product_colors": {"hex_value": "#fff"}
        }))
        .unwrap();

        assert_eq!(product.id, "7");
        assert_eq!(product.price, "0.00");
        assert_eq!(product.price_sign, "$");
        assert_eq!(product.currency, "USD");
        assert_eq!(product.description, "No description available");
        assert_eq!(product.rating, None);
        assert_eq!(product.category, "Uncategorized");
        assert_eq!(product.product_type, "other");
        assert!(product.tag_list.is_empty());
        assert!(product.product_colors.is_empty());
        assert_eq!(product.product_link, "");
        assert_eq!(product.created_at, None);
    }

    #[test]
    fn coerces_rating() {
        let with = |rating: Value| {
            normalize_record(&with_fields(raw_product(1, "b", "n"), json!({ "rating": rating })))
                .unwrap()
                .rating
        };
        assert_eq!(with(json!(4.5)), Some(4.5));
        assert_eq!(with(json!("3")), Some(3.0));
        assert_eq!(with(json!(0)), None);
        assert_eq!(with(json!(7)), None);
        assert_eq!(with(json!("great")), None);
        assert_eq!(with(json!(true)), None);
    }

    #[test]
    fn numeric_price_and_id_become_strings() {
        let product =
            normalize_record(&with_fields(raw_product(12, "b", "n"), json!({ "price": 5.5 })))
                .unwrap();
        assert_eq!(product.id, "12");
        assert_eq!(product.price, "5.5");
        assert_eq!(product.price_value(), Some(5.5));
    }

    #[test]
    fn missing_id_is_derived_from_brand_and_name() {
        let mut record = raw_product(1, "Maybelline", "Fit Me!");
        record.as_object_mut().unwrap().remove("id");
        assert_eq!(normalize_record(&record).unwrap().id, "maybelline-fit-me-");
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let raw = json!([
            raw_product(1, "nyx", "First"),
            raw_product(1, "nyx", "Second"),
        ]);
        let products = normalize(&raw).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "First");
    }

    #[test]
    fn keeps_only_string_tags_and_object_colors() {
        let product = normalize_record(&with_fields(
            raw_product(1, "b", "n"),
            json!({
                "tag_list": ["Vegan", 3, null, "organic"],
                "product_colors": [{"hex_value": "#000"}, "red", {"colour_name": "Noir"}]
            }),
        ))
        .unwrap();
        assert_eq!(product.tag_list, vec!["Vegan", "organic"]);
        assert_eq!(
            product.product_colors,
            vec![
                ProductColor { hex_value: "#000".into(), colour_name: String::new() },
                ProductColor { hex_value: String::new(), colour_name: "Noir".into() },
            ]
        );
    }

    fn opt_text() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("[a-zA-Z0-9 .,'#-]{0,12}")
    }

    fn arb_record() -> impl Strategy<Value = Value> {
        (
            "[a-zA-Z0-9]{1,8}",
            "[a-zA-Z][a-zA-Z ']{0,15}",
            "[a-zA-Z][a-zA-Z0-9 ]{0,15}",
            opt_text(),
            opt_text(),
            proptest::option::of(0u8..=12),
            proptest::collection::vec("[a-z]{1,6}", 0..4),
            opt_text(),
        )
            .prop_map(|(id, brand, name, price, category, half_stars, tags, description)| {
                json!({
                    "id": id,
                    "brand": brand,
                    "name": name,
                    "image_link": "https://cdn.example.test/p.jpg",
                    "price": price,
                    "category": category,
                    "rating": half_stars.map(|h| f64::from(h) / 2.0),
                    "tag_list": tags,
                    "description": description,
                    "product_colors": [{"hex_value": "#abcdef", "colour_name": "Sky"}],
                })
            })
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(record in arb_record()) {
            let once = normalize_record(&record).unwrap();
            let refed = serde_json::to_value(&once).unwrap();
            let twice = normalize_record(&refed).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
