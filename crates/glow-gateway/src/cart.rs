// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cart and wishlist handlers.
//!
//! Additions resolve the product through the catalog facade, so only
//! products the catalog currently serves can be added.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use glow_catalog::Product;
use glow_core::GlowError;
use glow_store::Cart;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::server::GatewayState;

/// Request body for POST /cart/items and POST /wishlist.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: String,
}

/// Request body for PATCH /cart/items/{id}.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub struct WishlistResponse {
    pub items: Vec<Product>,
    pub count: usize,
}

impl From<Vec<Product>> for WishlistResponse {
    fn from(items: Vec<Product>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}

/// Largest quantity accepted for one cart line.
const MAX_QUANTITY: u32 = 99;

/// GET /cart
pub async fn get_cart(State(state): State<GatewayState>) -> Result<Json<Cart>, ApiError> {
    Ok(Json(state.store.cart().await?))
}

/// POST /cart/items
pub async fn add_cart_item(
    State(state): State<GatewayState>,
    req: Result<Json<AddItemRequest>, JsonRejection>,
) -> Result<Json<Cart>, ApiError> {
    let Json(req) = req?;
    let product = state.catalog.product_by_id(&req.product_id).await?;
    Ok(Json(state.store.add_to_cart(product).await?))
}

/// PATCH /cart/items/{id}
pub async fn update_cart_item(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    req: Result<Json<UpdateQuantityRequest>, JsonRejection>,
) -> Result<Json<Cart>, ApiError> {
    let Json(req) = req?;
    if req.quantity > MAX_QUANTITY {
        return Err(GlowError::Validation(format!(
            "quantity must be at most {MAX_QUANTITY}, got {}",
            req.quantity
        ))
        .into());
    }
    Ok(Json(state.store.update_quantity(&id, req.quantity).await?))
}

/// DELETE /cart/items/{id}
pub async fn remove_cart_item(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<Cart>, ApiError> {
    Ok(Json(state.store.remove_from_cart(&id).await?))
}

/// DELETE /cart
pub async fn clear_cart(State(state): State<GatewayState>) -> Result<Json<Cart>, ApiError> {
    Ok(Json(state.store.clear_cart().await?))
}

/// GET /wishlist
pub async fn get_wishlist(
    State(state): State<GatewayState>,
) -> Result<Json<WishlistResponse>, ApiError> {
    Ok(Json(state.store.wishlist().await?.into()))
}

/// POST /wishlist
pub async fn add_wishlist_item(
    State(state): State<GatewayState>,
    req: Result<Json<AddItemRequest>, JsonRejection>,
) -> Result<Json<WishlistResponse>, ApiError> {
    let Json(req) = req?;
    let product = state.catalog.product_by_id(&req.product_id).await?;
    Ok(Json(state.store.add_to_wishlist(product).await?.into()))
}

/// DELETE /wishlist/{id}
pub async fn remove_wishlist_item(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<WishlistResponse>, ApiError> {
    Ok(Json(state.store.remove_from_wishlist(&id).await?.into()))
}
