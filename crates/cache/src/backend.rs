//! Backend selection

use crate::{Cache, MemoryCache, Result, SqliteCache};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// The cache in use by a running process
pub enum CacheBackend {
    Sqlite(SqliteCache),
    Memory(MemoryCache),
}

impl CacheBackend {
    /// Open the SQLite cache at `path`, or a memory cache when `dev_mode` is
    /// set, no path is given, or the database cannot be opened.
    pub async fn open(path: Option<&Path>, dev_mode: bool) -> Self {
        let path = match path {
            Some(path) if !dev_mode => path,
            _ => {
                info!("Using in-memory cache");
                return Self::Memory(MemoryCache::new());
            }
        };

        match SqliteCache::connect(path).await {
            Ok(cache) => Self::Sqlite(cache),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Falling back to in-memory cache");
                Self::Memory(MemoryCache::new())
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Memory(_) => "memory",
        }
    }

    /// Delete every entry that is no longer fresh
    pub async fn purge_expired(&self) -> Result<u64> {
        match self {
            Self::Sqlite(cache) => cache.purge_expired().await,
            Self::Memory(cache) => Ok(cache.purge_expired().await),
        }
    }
}

impl Cache for CacheBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            Self::Sqlite(cache) => cache.get(key).await,
            Self::Memory(cache) => cache.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        match self {
            Self::Sqlite(cache) => cache.set(key, value, ttl).await,
            Self::Memory(cache) => cache.set(key, value, ttl).await,
        }
    }

    async fn clear(&self, pattern: Option<&str>) -> Result<u64> {
        match self {
            Self::Sqlite(cache) => cache.clear(pattern).await,
            Self::Memory(cache) => cache.clear(pattern).await,
        }
    }
}
