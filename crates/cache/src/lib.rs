//! Chronos Cache Layer
//!
//! Key-value storage with a freshness window for computed reports. Backed by
//! SQLite for persistent deployments or a process-local map otherwise.

mod backend;
mod memory;
mod models;
mod queries;
mod schema;

pub use backend::CacheBackend;
pub use memory::MemoryCache;
pub use models::*;
pub use schema::SqliteCache;

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// How long a stored report stays fresh
pub const DEFAULT_TTL: Duration = Duration::from_secs(6 * 60 * 60);

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Database connection failed: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(String),
}

pub type Result<T> = std::result::Result<T, CacheError>;

/// A key-value store with per-entry expiry
pub trait Cache: Send + Sync {
    /// Fresh value for `key`, if any. Stale entries are dropped on read.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Store `value` under `key`, replacing any previous entry.
    fn set(&self, key: &str, value: &str, ttl: Duration) -> impl Future<Output = Result<()>> + Send;

    /// Remove entries whose key contains `pattern`, or everything when
    /// `pattern` is `None`. Returns the number of entries removed.
    fn clear(&self, pattern: Option<&str>) -> impl Future<Output = Result<u64>> + Send;
}
