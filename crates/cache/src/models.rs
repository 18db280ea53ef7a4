//! Cache entry model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A stored value with its timestamps in milliseconds since the epoch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CacheEntry {
    pub key: String,
    pub value: String,
    pub stored_at: i64,
    pub expires_at: i64,
}

impl CacheEntry {
    pub fn new(key: &str, value: &str, ttl: Duration, now: DateTime<Utc>) -> Self {
        let stored_at = now.timestamp_millis();
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        Self {
            key: key.to_string(),
            value: value.to_string(),
            stored_at,
            expires_at: stored_at.saturating_add(ttl_ms),
        }
    }

    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now.timestamp_millis()
    }
}
