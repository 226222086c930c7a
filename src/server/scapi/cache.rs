//! Process-wide TTL cache for Star Citizen API responses.
//!
//! Entries expire by TTL or explicit clear only; a sync run writing to the
//! database does not invalidate what it just fetched, so reads inside the
//! TTL window may serve data that is older than the database contents.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use parking_lot::RwLock;

struct CacheEntry {
    expires_at: Instant,
    value: serde_json::Value,
}

#[derive(Default)]
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key` if it has not expired.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let entries = self.entries.read();
        let entry = entries.get(key)?;

        if entry.expires_at <= Instant::now() {
            return None;
        }

        Some(entry.value.clone())
    }

    pub fn insert(&self, key: &str, value: serde_json::Value, ttl: Duration) {
        let entry = CacheEntry {
            expires_at: Instant::now() + ttl,
            value,
        };

        self.entries.write().insert(key.to_string(), entry);
    }

    /// Removes all entries whose key starts with `prefix`, returning how many
    /// were dropped.
    pub fn clear_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));

        before - entries.len()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
