// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable local store for cart and wishlist state.
//!
//! SQLite via `tokio-rusqlite`, with the schema managed by embedded
//! refinery migrations. The whole state is one JSON document in the `kv`
//! table, rewritten on every mutation.

pub mod database;
pub mod models;
pub mod store;

pub use database::Database;
pub use models::{Cart, CartItem, StoreState};
pub use store::{LocalStore, STORE_KEY};
