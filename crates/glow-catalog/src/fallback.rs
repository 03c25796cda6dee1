// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in product set served when neither the upstream nor the cache can.

use glow_core::GlowError;

use crate::model::Product;
use crate::normalize::normalize;

const FALLBACK_JSON: &str = include_str!("../data/fallback_products.json");

/// The static fallback set, run through the normalizer like upstream data.
///
/// Errors only if the embedded data is malformed, which is the one failure
/// the query facade surfaces to its caller.
pub fn fallback_products() -> Result<Vec<Product>, GlowError> {
    let raw: serde_json::Value = serde_json::from_str(FALLBACK_JSON)
        .map_err(|e| GlowError::Internal(format!("fallback product set is not valid JSON: {e}")))?;
    let products = normalize(&raw)
        .map_err(|e| GlowError::Internal(format!("fallback product set is unusable: {e}")))?;
    if products.is_empty() {
        return Err(GlowError::Internal("fallback product set is empty".to_string()));
    }
    Ok(products)
}
