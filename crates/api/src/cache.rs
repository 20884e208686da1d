//! In-process cache for public listing responses.
//!
//! Entries expire a fixed time after they are stored. Writes to the catalog
//! never invalidate them, so a cached page can be stale for up to one TTL.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::RwLock;

/// Cache key of the public category list.
pub const CATEGORIES_KEY: &str = "categories";

/// Cache key of one unfiltered public product page.
pub fn product_page_key(page: i64, per_page: i64) -> String {
    format!("products:page:{page}:per:{per_page}")
}

struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Key to serialized-JSON map with per-entry expiry.
#[derive(Default)]
pub struct ListingCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl ListingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached value for `key`, if present and not expired.
    ///
    /// An expired entry is removed on the way out.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|e| e.is_expired(now)) {
            entries.remove(key);
            tracing::debug!(key, "Listing cache entry expired");
        }
        None
    }

    /// Store `value` under `key` for `ttl`, replacing any previous entry.
    pub async fn set(&self, key: impl Into<String>, value: Value, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.into(), entry);
    }

    /// Number of stored entries, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop every expired entry. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }
}
