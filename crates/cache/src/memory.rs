//! Process-local cache

use crate::models::CacheEntry;
use crate::{Cache, Result};
use chrono::Utc;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Entry count above which a write also sweeps expired entries
const SWEEP_THRESHOLD: usize = 100;

/// In-memory cache, used in development or when no database is configured
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Delete every entry that is no longer fresh
    pub async fn purge_expired(&self) -> u64 {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh_at(now));
        (before - entries.len()) as u64
    }
}

impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Utc::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.is_fresh_at(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        debug!(key = key, "Dropping stale cache entry");
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| !entry.is_fresh_at(now)) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), CacheEntry::new(key, value, ttl, now));

        if entries.len() > SWEEP_THRESHOLD {
            let before = entries.len();
            entries.retain(|_, entry| entry.is_fresh_at(now));
            debug!(removed = before - entries.len(), "Swept expired cache entries");
        }

        Ok(())
    }

    async fn clear(&self, pattern: Option<&str>) -> Result<u64> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        match pattern {
            Some(pattern) => entries.retain(|key, _| !key.contains(pattern)),
            None => entries.clear(),
        }
        Ok((before - entries.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = MemoryCache::new();
        cache.set("k", "v", Duration::from_secs(60)).await.unwrap();

        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(cache.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_stale_entry_is_dropped_on_read() {
        let cache = MemoryCache::new();
        cache.set("k", "v", Duration::ZERO).await.unwrap();

        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_large_cache_sweeps_expired_on_write() {
        let cache = MemoryCache::new();
        for i in 0..SWEEP_THRESHOLD {
            cache.set(&format!("stale-{}", i), "v", Duration::ZERO).await.unwrap();
        }
        assert_eq!(cache.len().await, SWEEP_THRESHOLD);

        cache.set("fresh", "v", Duration::from_secs(60)).await.unwrap();
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_clear_by_pattern() {
        let cache = MemoryCache::new();
        let ttl = Duration::from_secs(60);
        cache.set("github-unwrapped-aaaa-2024", "a", ttl).await.unwrap();
        cache.set("github-unwrapped-bbbb-2023", "b", ttl).await.unwrap();
        cache.set("other", "c", ttl).await.unwrap();

        assert_eq!(cache.clear(Some("2024")).await.unwrap(), 1);
        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.clear(None).await.unwrap(), 2);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let cache = MemoryCache::new();
        cache.set("old", "v", Duration::ZERO).await.unwrap();
        cache.set("new", "v", Duration::from_secs(60)).await.unwrap();

        assert_eq!(cache.purge_expired().await, 1);
        assert_eq!(cache.len().await, 1);
    }
}
