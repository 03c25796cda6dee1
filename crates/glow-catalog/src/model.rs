// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical product model.
//!
//! Only the normalizer constructs [`Product`] values from upstream data;
//! nothing downstream ever sees a raw upstream record.

use serde::{Deserialize, Serialize};

/// A catalog product after normalization.
///
/// Every optional upstream field has a deterministic default, so consumers
/// can rely on every field being present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub brand: String,
    pub name: String,
    /// Decimal string as published upstream, `"0.00"` when absent.
    pub price: String,
    pub price_sign: String,
    pub currency: String,
    pub image_link: String,
    pub product_link: String,
    pub website_link: String,
    pub description: String,
    /// Rating in `0..=5`, `None` when absent or unusable.
    pub rating: Option<f64>,
    pub category: String,
    pub product_type: String,
    pub tag_list: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub product_api_url: String,
    pub api_featured_image: String,
    pub product_colors: Vec<ProductColor>,
}

impl Product {
    /// Parsed price, if the price string is a finite number.
    pub fn price_value(&self) -> Option<f64> {
        self.price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
    }

    /// Case-insensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.to_lowercase();
        self.tag_list.iter().any(|t| t.to_lowercase() == wanted)
    }
}

/// A color variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductColor {
    pub hex_value: String,
    pub colour_name: String,
}
