// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted cart and wishlist shapes.

use glow_catalog::Product;
use serde::{Deserialize, Serialize};

/// A product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// Line total; an unparseable price counts as zero.
    pub fn line_total(&self) -> f64 {
        self.product.price_value().unwrap_or(0.0) * f64::from(self.quantity)
    }
}

/// The whole persisted document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    #[serde(default)]
    pub cart: Vec<CartItem>,
    #[serde(default)]
    pub wishlist: Vec<Product>,
}

/// Cart contents with derived totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub item_count: u64,
    /// Two-decimal sum of line totals.
    pub subtotal: String,
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        let item_count = items
            .iter()
            .fold(0u64, |acc, i| acc.saturating_add(u64::from(i.quantity)));
        // An empty f64 sum is -0.0, which would render as "-0.00".
        let total = items
            .iter()
            .map(CartItem::line_total)
            .fold(0.0, |acc, line| acc + line);
        let subtotal = format!("{total:.2}");
        Self {
            items,
            item_count,
            subtotal,
        }
    }
}
