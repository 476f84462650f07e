use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use crate::cache::{self, CacheStore, KvRestCache, SqliteCache};
use crate::config::EngineConfig;
use crate::core::{Fetched, Match, PlayerProfile, PlayerStats};
use crate::error::Result;
use crate::extract;
use crate::mock;
use crate::render::{BrowserlessClient, RenderClient};

/// Cache-first retrieval of player pages
///
/// Every operation checks the cache, and on a miss renders the page (or
/// generates mock data when no render key is configured), extracts the
/// record, stores it for `ttl_secs` and returns it. Render failures are
/// returned as-is and never cached; cache failures only cost a fresh fetch.
pub struct PlayerEngine {
    cache: Arc<dyn CacheStore>,
    renderer: Arc<dyn RenderClient>,
    site_base_url: String,
    ttl_secs: u64,
    mock: bool,
}

impl PlayerEngine {
    /// Create engine from explicit backends
    pub fn new(
        config: &EngineConfig,
        cache: Arc<dyn CacheStore>,
        renderer: Arc<dyn RenderClient>,
    ) -> Self {
        let mock = !config.render.has_credential();
        if mock {
            tracing::info!("BROWSERLESS_API_KEY not configured, serving mock data");
        }

        Self {
            cache,
            renderer,
            site_base_url: config.site_base_url.trim_end_matches('/').to_string(),
            ttl_secs: config.cache.ttl_secs,
            mock,
        }
    }

    /// Create engine with the default backends for `config`
    ///
    /// Uses the KV REST cache when its URL and token are set, SQLite otherwise.
    pub async fn from_config(config: EngineConfig) -> Result<Self> {
        let cache: Arc<dyn CacheStore> = match config.cache.kv_credentials() {
            Some((url, token)) => {
                tracing::info!("Using KV REST cache at {}", url);
                Arc::new(KvRestCache::new(url, token)?)
            }
            None => {
                tracing::info!("Using SQLite cache at {}", config.cache.sqlite_path);
                Arc::new(SqliteCache::new(&config.cache.sqlite_path).await?)
            }
        };

        let renderer = Arc::new(BrowserlessClient::new(config.render.clone())?);
        tracing::info!("Using {} render client", renderer.name());

        Ok(Self::new(&config, cache, renderer))
    }

    /// True when no render key is configured
    pub fn is_mock(&self) -> bool {
        self.mock
    }

    /// Get a player's profile
    pub async fn profile(&self, player_id: &str) -> Result<Fetched<PlayerProfile>> {
        self.retrieve(&cache::profile_key(player_id), self.fetch_profile(player_id))
            .await
    }

    /// Get one page of a player's finished matches
    pub async fn matches(&self, player_id: &str, page: u32) -> Result<Fetched<Vec<Match>>> {
        self.retrieve(&cache::matches_key(player_id, page), self.fetch_matches(player_id, page))
            .await
    }

    /// Get a player's aggregate stats
    pub async fn stats(&self, player_id: &str) -> Result<Fetched<PlayerStats>> {
        self.retrieve(&cache::stats_key(player_id), self.fetch_stats(player_id))
            .await
    }

    fn player_url(&self, player_id: &str) -> String {
        format!("{}/player/{}", self.site_base_url, urlencoding::encode(player_id))
    }

    async fn fetch_profile(&self, player_id: &str) -> Result<PlayerProfile> {
        if self.mock {
            return Ok(mock::mock_profile(player_id));
        }
        let html = self.renderer.render(&self.player_url(player_id)).await?;
        Ok(extract::extract_profile(&html))
    }

    async fn fetch_matches(&self, player_id: &str, page: u32) -> Result<Vec<Match>> {
        if self.mock {
            return Ok(mock::mock_matches(player_id, page));
        }
        let url = format!("{}/matches?page={}", self.player_url(player_id), page);
        let html = self.renderer.render(&url).await?;
        Ok(extract::extract_matches(&html))
    }

    async fn fetch_stats(&self, player_id: &str) -> Result<PlayerStats> {
        if self.mock {
            return Ok(mock::mock_stats(player_id));
        }
        let url = format!("{}/stats", self.player_url(player_id));
        let html = self.renderer.render(&url).await?;
        Ok(extract::extract_stats(&html))
    }

    /// Cache lookup, then fetch and store on a miss (`fetch` is only polled then)
    async fn retrieve<T, F>(&self, key: &str, fetch: F) -> Result<Fetched<T>>
    where
        T: Serialize + DeserializeOwned,
        F: Future<Output = Result<T>>,
    {
        let start = Instant::now();

        if let Some(data) = self.cache_get::<T>(key).await {
            tracing::debug!("Cache hit for {}", key);
            return Ok(Fetched::from_cache(data, elapsed_ms(start)));
        }

        let data = fetch.await.map_err(|e| {
            tracing::debug!("Fetch for {} via {} failed: {}", key, self.renderer.name(), e);
            e
        })?;

        self.cache_set(key, &data).await;

        Ok(Fetched::fresh(data, elapsed_ms(start)))
    }

    /// Cache read; any failure is logged and reported as a miss
    async fn cache_get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = match self.cache.get(key).await {
            Ok(value) => value?,
            Err(e) => {
                tracing::warn!("Cache {} get failed for {}: {}", self.cache.name(), key, e);
                return None;
            }
        };

        match serde_json::from_value(value) {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!("Discarding unreadable cache entry {}: {}", key, e);
                None
            }
        }
    }

    /// Cache write; any failure is logged and ignored
    async fn cache_set<T: Serialize>(&self, key: &str, data: &T) {
        let value = match serde_json::to_value(data) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to serialize {} for cache: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.cache.set(key, &value, self.ttl_secs).await {
            tracing::warn!("Failed to save {} to cache {}: {}", key, self.cache.name(), e);
        }
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
