//! SQLite cache queries

use crate::models::CacheEntry;
use crate::schema::SqliteCache;
use crate::{Cache, Result};
use chrono::Utc;
use std::time::Duration;
use tracing::debug;

impl SqliteCache {
    /// Delete every entry that is no longer fresh
    pub async fn purge_expired(&self) -> Result<u64> {
        let removed = sqlx::query("DELETE FROM cache_entries WHERE expires_at <= ?")
            .bind(Utc::now().timestamp_millis())
            .execute(self.pool())
            .await?
            .rows_affected();

        debug!(removed = removed, "Purged expired cache entries");
        Ok(removed)
    }

    /// Number of stored entries, fresh or not
    pub async fn len(&self) -> Result<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cache_entries")
            .fetch_one(self.pool())
            .await?;
        Ok(count as u64)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM cache_entries WHERE key = ?")
            .bind(key)
            .execute(self.pool())
            .await?;
        Ok(())
    }
}

impl Cache for SqliteCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entry = sqlx::query_as::<_, CacheEntry>(
            "SELECT key, value, stored_at, expires_at FROM cache_entries WHERE key = ?",
        )
        .bind(key)
        .fetch_optional(self.pool())
        .await?;

        match entry {
            Some(entry) if entry.is_fresh_at(Utc::now()) => Ok(Some(entry.value)),
            Some(_) => {
                debug!(key = key, "Dropping stale cache entry");
                self.delete(key).await?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let entry = CacheEntry::new(key, value, ttl, Utc::now());

        sqlx::query(
            "INSERT OR REPLACE INTO cache_entries (key, value, stored_at, expires_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&entry.key)
        .bind(&entry.value)
        .bind(entry.stored_at)
        .bind(entry.expires_at)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn clear(&self, pattern: Option<&str>) -> Result<u64> {
        let result = match pattern {
            Some(pattern) => {
                sqlx::query("DELETE FROM cache_entries WHERE instr(key, ?) > 0")
                    .bind(pattern)
                    .execute(self.pool())
                    .await?
            }
            None => {
                sqlx::query("DELETE FROM cache_entries")
                    .execute(self.pool())
                    .await?
            }
        };

        Ok(result.rows_affected())
    }
}
