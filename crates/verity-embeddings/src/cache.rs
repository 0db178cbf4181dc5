//! Query embedding cache using moka.
//!
//! Keys are blake3 hashes of the query text. Entries idle for an hour expire.

use std::time::Duration;

use moka::sync::Cache;

/// In-memory query embedding cache. A capacity of 0 disables it.
pub struct QueryCache {
    cache: Option<Cache<String, Vec<f32>>>,
}

impl QueryCache {
    pub fn new(max_entries: u64) -> Self {
        let cache = (max_entries > 0).then(|| {
            Cache::builder()
                .max_capacity(max_entries)
                .time_to_idle(Duration::from_secs(3600))
                .build()
        });
        Self { cache }
    }

    /// Cache key for a query.
    pub fn key(query: &str) -> String {
        blake3::hash(query.as_bytes()).to_hex().to_string()
    }

    pub fn get(&self, query: &str) -> Option<Vec<f32>> {
        self.cache.as_ref()?.get(&Self::key(query))
    }

    pub fn insert(&self, query: &str, embedding: Vec<f32>) {
        if let Some(cache) = &self.cache {
            cache.insert(Self::key(query), embedding);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Invalidate all entries.
    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
        }
    }
}
