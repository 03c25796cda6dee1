// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Freshness cache holding the last successfully fetched product set.
//!
//! One entry, overwritten wholesale on every successful fetch. Reads within
//! the fresh window are served directly; reads within the stale window are
//! only served after a failed refresh, and flag the entry as stale.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use glow_config::model::CacheConfig;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::model::Product;

/// A cached product set and when it was fetched.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub products: Arc<Vec<Product>>,
    pub stored_at: Instant,
    pub fetched_at: DateTime<Utc>,
    pub is_stale: bool,
}

impl CacheEntry {
    pub fn age(&self) -> Duration {
        self.stored_at.elapsed()
    }
}

/// Observed cache state, for health reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStatus {
    pub populated: bool,
    pub age: Option<Duration>,
    pub is_stale: bool,
}

#[derive(Debug)]
pub struct FreshnessCache {
    fresh_ttl: Duration,
    stale_ttl: Duration,
    entry: RwLock<Option<CacheEntry>>,
}

impl FreshnessCache {
    pub fn new(fresh_ttl: Duration, stale_ttl: Duration) -> Self {
        Self {
            fresh_ttl,
            stale_ttl,
            entry: RwLock::new(None),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.fresh_ttl(), config.stale_ttl())
    }

    /// The entry, if it is younger than the fresh window.
    pub async fn fresh(&self) -> Option<CacheEntry> {
        self.entry
            .read()
            .await
            .as_ref()
            .filter(|e| e.age() < self.fresh_ttl)
            .cloned()
    }

    /// The entry, if it is younger than the stale window, marked stale.
    pub async fn stale(&self) -> Option<CacheEntry> {
        let mut guard = self.entry.write().await;
        let entry = guard.as_mut().filter(|e| e.age() < self.stale_ttl)?;
        entry.is_stale = true;
        Some(entry.clone())
    }

    /// Replace the entry with a freshly fetched product set.
    pub async fn store(&self, products: Vec<Product>) -> CacheEntry {
        let entry = CacheEntry {
            products: Arc::new(products),
            stored_at: Instant::now(),
            fetched_at: Utc::now(),
            is_stale: false,
        };
        *self.entry.write().await = Some(entry.clone());
        entry
    }

    pub async fn status(&self) -> CacheStatus {
        let guard = self.entry.read().await;
        CacheStatus {
            populated: guard.is_some(),
            age: guard.as_ref().map(CacheEntry::age),
            is_stale: guard.as_ref().is_some_and(|e| e.is_stale),
        }
    }
}
