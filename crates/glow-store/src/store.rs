// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cart and wishlist operations over a single persisted JSON document.
//!
//! Every mutation reads the document, applies the change and writes it back
//! inside one transaction on the database thread.

use async_trait::async_trait;
use chrono::Utc;
use glow_catalog::Product;
use glow_config::model::StoreConfig;
use glow_core::{GlowError, HealthStatus, PluginAdapter};
use rusqlite::{OptionalExtension, params};
use tracing::{debug, warn};

use crate::database::{Database, map_tr_err};
use crate::models::{Cart, CartItem, StoreState};

/// Key of the persisted document in the `kv` table.
pub const STORE_KEY: &str = "glow-store";

pub struct LocalStore {
    db: Database,
}

impl LocalStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn open(config: &StoreConfig) -> Result<Self, GlowError> {
        let db = Database::open(&config.database_path).await?;
        debug!(path = %config.database_path, "local store opened");
        Ok(Self::new(db))
    }

    /// The full persisted document.
    pub async fn state(&self) -> Result<StoreState, GlowError> {
        self.db
            .connection()
            .call(|conn| read_state(conn))
            .await
            .map_err(map_tr_err)
    }

    async fn mutate<R, F>(&self, f: F) -> Result<R, GlowError>
    where
        F: FnOnce(&mut StoreState) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.db
            .connection()
            .call(move |conn| -> Result<R, rusqlite::Error> {
                let tx = conn.transaction()?;
                let mut state = read_state(&tx)?;
                let out = f(&mut state);
                write_state(&tx, &state)?;
                tx.commit()?;
                Ok(out)
            })
            .await
            .map_err(map_tr_err)
    }

    // --- Cart ---

    pub async fn cart(&self) -> Result<Cart, GlowError> {
        Ok(Cart::from(self.state().await?.cart))
    }

    /// Add one unit of `product`, incrementing the quantity if present.
    pub async fn add_to_cart(&self, product: Product) -> Result<Cart, GlowError> {
        let items = self
            .mutate(move |state| {
                match state.cart.iter_mut().find(|i| i.product.id == product.id) {
                    Some(item) => item.quantity = item.quantity.saturating_add(1),
                    None => state.cart.push(CartItem {
                        product,
                        quantity: 1,
                    }),
                }
                state.cart.clone()
            })
            .await?;
        Ok(Cart::from(items))
    }

    /// Remove a product from the cart. Removing an absent id is a no-op.
    pub async fn remove_from_cart(&self, product_id: &str) -> Result<Cart, GlowError> {
        let id = product_id.to_string();
        let items = self
            .mutate(move |state| {
                state.cart.retain(|i| i.product.id != id);
                state.cart.clone()
            })
            .await?;
        Ok(Cart::from(items))
    }

    /// Set the quantity of a cart item; zero removes it.
    ///
    /// Fails with `NotFound` if the product is not in the cart.
    pub async fn update_quantity(
        &self,
        product_id: &str,
        quantity: u32,
    ) -> Result<Cart, GlowError> {
        let id = product_id.to_string();
        let (found, items) = self
            .mutate(move |state| {
                let found = state.cart.iter().any(|i| i.product.id == id);
                if quantity == 0 {
                    state.cart.retain(|i| i.product.id != id);
                } else if let Some(item) = state.cart.iter_mut().find(|i| i.product.id == id) {
                    item.quantity = quantity;
                }
                (found, state.cart.clone())
            })
            .await?;
        if !found {
            return Err(GlowError::not_found("cart item", product_id));
        }
        Ok(Cart::from(items))
    }

    pub async fn clear_cart(&self) -> Result<Cart, GlowError> {
        self.mutate(|state| state.cart.clear()).await?;
        Ok(Cart::from(Vec::new()))
    }

    /// Two-decimal subtotal of the cart.
    pub async fn cart_subtotal(&self) -> Result<String, GlowError> {
        Ok(self.cart().await?.subtotal)
    }

    // --- Wishlist ---

    pub async fn wishlist(&self) -> Result<Vec<Product>, GlowError> {
        Ok(self.state().await?.wishlist)
    }

    /// Add `product` unless a product with the same id is already listed.
    pub async fn add_to_wishlist(&self, product: Product) -> Result<Vec<Product>, GlowError> {
        self.mutate(move |state| {
            if !state.wishlist.iter().any(|p| p.id == product.id) {
                state.wishlist.push(product);
            }
            state.wishlist.clone()
        })
        .await
    }

    pub async fn remove_from_wishlist(&self, product_id: &str) -> Result<Vec<Product>, GlowError> {
        let id = product_id.to_string();
        self.mutate(move |state| {
            state.wishlist.retain(|p| p.id != id);
            state.wishlist.clone()
        })
        .await
    }

    pub async fn is_in_wishlist(&self, product_id: &str) -> Result<bool, GlowError> {
        Ok(self.wishlist().await?.iter().any(|p| p.id == product_id))
    }
}

/// Read the document; a missing or unreadable document yields an empty state.
fn read_state(conn: &rusqlite::Connection) -> Result<StoreState, rusqlite::Error> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value FROM kv WHERE key = ?1",
            params![STORE_KEY],
            |row| row.get(0),
        )
        .optional()?;

    let Some(raw) = raw else {
        return Ok(StoreState::default());
    };
    match serde_json::from_str(&raw) {
        Ok(state) => Ok(state),
        Err(e) => {
            warn!(error = %e, "discarding unreadable store document");
            Ok(StoreState::default())
        }
    }
}

fn write_state(conn: &rusqlite::Connection, state: &StoreState) -> Result<(), rusqlite::Error> {
    let value = serde_json::to_string(state)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    conn.execute(
        "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![STORE_KEY, value, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}

#[async_trait]
impl PluginAdapter for LocalStore {
    fn name(&self) -> &str {
        "store"
    }

    async fn health_check(&self) -> Result<HealthStatus, GlowError> {
        self.db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GlowError> {
        self.db.checkpoint().await?;
        debug!("store shutdown: WAL checkpoint complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glow_catalog::normalize::normalize_record;
    use glow_test_utils::fixtures::{raw_product, with_fields};
    use serde_json::json;
    use tempfile::tempdir;

    fn product(id: u64, price: &str) -> Product {
        normalize_record(&with_fields(
            raw_product(id, "nyx", &format!("Product {id}")),
            json!({ "price": price }),
        ))
        .unwrap()
    }

    async fn memory_store() -> LocalStore {
        LocalStore::new(Database::open(":memory:").await.unwrap())
    }

    #[tokio::test]
    async fn adding_twice_increments_quantity() {
        let store = memory_store().await;
        store.add_to_cart(product(1, "5.00")).await.unwrap();
        let cart = store.add_to_cart(product(1, "5.00")).await.unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.item_count, 2);
        assert_eq!(cart.subtotal, "10.00");
    }

    #[tokio::test]
    async fn update_remove_and_clear() {
        let store = memory_store().await;
        store.add_to_cart(product(1, "5.00")).await.unwrap();
        store.add_to_cart(product(2, "2.50")).await.unwrap();

        let cart = store.update_quantity("2", 3).await.unwrap();
        assert_eq!(cart.subtotal, "12.50");

        let cart = store.update_quantity("1", 0).await.unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].product.id, "2");

        assert!(matches!(
            store.update_quantity("404", 1).await,
            Err(GlowError::NotFound { .. })
        ));

        let cart = store.remove_from_cart("2").await.unwrap();
        assert!(cart.items.is_empty());

        store.add_to_cart(product(3, "1.00")).await.unwrap();
        assert!(store.clear_cart().await.unwrap().items.is_empty());
        assert_eq!(store.cart_subtotal().await.unwrap(), "0.00");
    }

    #[tokio::test]
    async fn unparseable_price_counts_as_zero() {
        let store = memory_store().await;
        store.add_to_cart(product(1, "call us")).await.unwrap();
        store.add_to_cart(product(2, "3.333")).await.unwrap();
        assert_eq!(store.cart_subtotal().await.unwrap(), "3.33");
    }

    #[tokio::test]
    async fn wishlist_has_no_duplicates() {
        let store = memory_store().await;
        store.add_to_wishlist(product(1, "5.00")).await.unwrap();
        let list = store.add_to_wishlist(product(1, "5.00")).await.unwrap();
        assert_eq!(list.len(), 1);
        assert!(store.is_in_wishlist("1").await.unwrap());

        let list = store.remove_from_wishlist("1").await.unwrap();
        assert!(list.is_empty());
        assert!(!store.is_in_wishlist("1").await.unwrap());
    }

    #[tokio::test]
    async fn state_survives_reopen() {
        let dir = tempdir().unwrap();
        let config = StoreConfig {
            database_path: dir.path().join("glow.db").to_str().unwrap().to_string(),
        };

        {
            let store = LocalStore::open(&config).await.unwrap();
            store.add_to_cart(product(7, "4.00")).await.unwrap();
            store.add_to_wishlist(product(8, "1.00")).await.unwrap();
            store.shutdown().await.unwrap();
        }

        let store = LocalStore::open(&config).await.unwrap();
        let state = store.state().await.unwrap();
        assert_eq!(state.cart.len(), 1);
        assert_eq!(state.cart[0].product.id, "7");
        assert_eq!(state.wishlist[0].id, "8");
    }

    #[tokio::test]
    async fn document_is_stored_under_store_key() {
        let store = memory_store().await;
        store.add_to_cart(product(1, "5.00")).await.unwrap();

        let raw: String = store
            .db
            .connection()
            .call(|conn| -> Result<String, rusqlite::Error> {
                conn.query_row(
                    "SELECT value FROM kv WHERE key = 'glow-store'",
                    [],
                    |row| row.get(0),
                )
            })
            .await
            .unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc["cart"][0]["id"], "1");
        assert_eq!(doc["cart"][0]["quantity"], 1);
        assert_eq!(doc["wishlist"], json!([]));
    }

    #[tokio::test]
    async fn corrupt_document_reads_as_empty() {
        let store = memory_store().await;
        store
            .db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute(
                    "INSERT INTO kv (key, value, updated_at) VALUES ('glow-store', 'not json', '')",
                    [],
                )?;
                Ok(())
            })
            .await
            .unwrap();
        assert_eq!(store.state().await.unwrap(), StoreState::default());
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
    }
}
