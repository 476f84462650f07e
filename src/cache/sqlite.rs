use rusqlite::{Connection, params, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::cache::{CacheStore, CacheStats};
use crate::error::{Result, EngineError};

/// SQLite-backed TTL cache
///
/// Used when no KV REST endpoint is configured, and in tests with `:memory:`.
/// ```sql
/// CREATE TABLE scrape_cache (
///     key TEXT PRIMARY KEY,
///     value TEXT NOT NULL,
///     expires_at INTEGER NOT NULL,  -- unix millis
///     cached_at TEXT NOT NULL       -- rfc3339
/// );
/// ```
pub struct SqliteCache {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCache {
    /// Create new SQLite cache
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS scrape_cache (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                expires_at INTEGER NOT NULL,
                cached_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_expires_at ON scrape_cache(expires_at)",
            [],
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| EngineError::CacheTransport("sqlite connection poisoned".to_string()))
    }

    fn now_millis() -> i64 {
        Utc::now().timestamp_millis()
    }

    /// Get cache statistics
    pub async fn stats(&self) -> Result<CacheStats> {
        let conn = self.lock()?;
        let now = Self::now_millis();

        let total_entries: u64 = conn.query_row(
            "SELECT COUNT(*) FROM scrape_cache",
            [],
            |row| row.get(0),
        )?;

        let live_entries: u64 = conn.query_row(
            "SELECT COUNT(*) FROM scrape_cache WHERE expires_at > ?",
            params![now],
            |row| row.get(0),
        )?;

        let (oldest, newest): (Option<String>, Option<String>) = conn.query_row(
            "SELECT MIN(cached_at), MAX(cached_at) FROM scrape_cache",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(CacheStats {
            total_entries,
            live_entries,
            oldest_entry: oldest.as_deref().and_then(parse_timestamp),
            newest_entry: newest.as_deref().and_then(parse_timestamp),
        })
    }

    /// Delete expired rows, returning how many were removed
    pub async fn cleanup(&self) -> Result<u64> {
        let conn = self.lock()?;

        let deleted = conn.execute(
            "DELETE FROM scrape_cache WHERE expires_at <= ?",
            params![Self::now_millis()],
        )?;

        Ok(deleted as u64)
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[async_trait]
impl CacheStore for SqliteCache {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let conn = self.lock()?;
        let now = Self::now_millis();

        let row: Option<(String, i64)> = conn
            .query_row(
                "SELECT value, expires_at FROM scrape_cache WHERE key = ?",
                params![key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match row {
            Some((value, expires_at)) if expires_at > now => {
                Ok(Some(serde_json::from_str(&value)?))
            }
            Some(_) => {
                // Expired: drop it lazily
                conn.execute("DELETE FROM scrape_cache WHERE key = ?", params![key])?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &Value, ttl_secs: u64) -> Result<()> {
        if ttl_secs == 0 {
            return Err(EngineError::CacheTransport(format!(
                "refusing to cache '{}' with zero ttl",
                key
            )));
        }

        let ttl_millis = i64::try_from(ttl_secs.saturating_mul(1000)).unwrap_or(i64::MAX);
        let expires_at = Self::now_millis().saturating_add(ttl_millis);
        let json = serde_json::to_string(value)?;

        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO scrape_cache (key, value, expires_at, cached_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![key, json, expires_at, Utc::now().to_rfc3339()],
        )?;

        Ok(())
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}
