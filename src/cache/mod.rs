pub mod kv_rest;
pub mod sqlite;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use kv_rest::KvRestCache;
pub use sqlite::SqliteCache;

/// Trait for TTL cache backends
///
/// Backends own expiry: `get` must never return a value whose TTL elapsed.
/// Errors are reported, not swallowed; the engine decides how to degrade.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get a live value by key
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Store a value for `ttl_secs` seconds, replacing any previous value
    async fn set(&self, key: &str, value: &Value, ttl_secs: u64) -> Result<()>;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

/// Cache key for a player's profile page
pub fn profile_key(player_id: &str) -> String {
    format!("player:{}", player_id)
}

/// Cache key for one page of a player's match history
pub fn matches_key(player_id: &str, page: u32) -> String {
    format!("matches:{}:{}", player_id, page)
}

/// Cache key for a player's stats page
pub fn stats_key(player_id: &str) -> String {
    format!("stats:{}", player_id)
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub total_entries: u64,
    pub live_entries: u64,
    pub oldest_entry: Option<chrono::DateTime<chrono::Utc>>,
    pub newest_entry: Option<chrono::DateTime<chrono::Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        assert_eq!(profile_key("1969509"), "player:1969509");
        assert_eq!(matches_key("1969509", 2), "matches:1969509:2");
        assert_eq!(stats_key("1969509"), "stats:1969509");
    }

    #[test]
    fn test_keys_are_disjoint() {
        let keys = [profile_key("7"), matches_key("7", 1), stats_key("7")];
        assert_ne!(keys[0], keys[1]);
        assert_ne!(keys[1], keys[2]);
        assert_ne!(keys[0], keys[2]);
    }
}
