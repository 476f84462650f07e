//! Engine configuration.
//!
//! Everything the engine needs is passed in as an [`EngineConfig`] value.
//! [`EngineConfig::from_env`] is a convenience for the binaries; the library
//! never reads the environment on its own.

use std::time::Duration;

/// Default site scraped for player pages
pub const DEFAULT_SITE_BASE_URL: &str = "https://gamersclub.com.br";

/// Default Browserless content endpoint
pub const DEFAULT_RENDER_ENDPOINT: &str = "https://chrome.browserless.io/content";

/// Default cache lifetime for every entry type
pub const DEFAULT_TTL_SECS: u64 = 300;

/// Top-level engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub render: RenderConfig,
    pub cache: CacheConfig,
    /// Base URL of the scraped site, without trailing slash
    pub site_base_url: String,
}

/// Render service settings
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Browserless token; `None` or blank selects mock data
    pub api_key: Option<String>,
    pub endpoint: String,
    /// Extra wait after navigation, forwarded as `waitFor`
    pub wait_for_ms: u64,
    /// Navigation condition, forwarded as `gotoOptions.waitUntil`
    pub wait_until: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

/// Cache backend settings
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// KV REST endpoint (Upstash-compatible)
    pub kv_url: Option<String>,
    pub kv_token: Option<String>,
    /// SQLite file used when no KV endpoint is configured
    pub sqlite_path: String,
    pub ttl_secs: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_RENDER_ENDPOINT.to_string(),
            wait_for_ms: 2000,
            wait_until: "networkidle2".to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            kv_url: None,
            kv_token: None,
            sqlite_path: "gamersclub.db".to_string(),
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            cache: CacheConfig::default(),
            site_base_url: DEFAULT_SITE_BASE_URL.to_string(),
        }
    }
}

impl RenderConfig {
    /// True when a non-blank API key is present
    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false)
    }

    /// Key prefix safe to print in logs
    pub fn masked_key(&self) -> String {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {
                let prefix: String = key.chars().take(8).collect();
                format!("{}...", prefix)
            }
            _ => "<unset>".to_string(),
        }
    }
}

impl CacheConfig {
    /// KV endpoint and token, when both are set
    pub fn kv_credentials(&self) -> Option<(&str, &str)> {
        match (self.kv_url.as_deref(), self.kv_token.as_deref()) {
            (Some(url), Some(token)) if !url.trim().is_empty() && !token.trim().is_empty() => {
                Some((url, token))
            }
            _ => None,
        }
    }
}

impl EngineConfig {
    /// Config without a render key: the engine serves mock data
    pub fn mock() -> Self {
        Self::default()
    }

    /// Config with the given render key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.render.api_key = Some(api_key.into());
        config
    }

    /// Build from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup (used by `from_env` and tests)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let request_timeout = lookup("RENDER_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.render.request_timeout);

        let ttl_secs = lookup("CACHE_TTL_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|ttl| *ttl > 0)
            .unwrap_or(defaults.cache.ttl_secs);

        Self {
            render: RenderConfig {
                api_key: lookup("BROWSERLESS_API_KEY"),
                endpoint: lookup("BROWSERLESS_ENDPOINT")
                    .unwrap_or_else(|| defaults.render.endpoint.clone()),
                request_timeout,
                ..defaults.render.clone()
            },
            cache: CacheConfig {
                kv_url: lookup("KV_REST_API_URL"),
                kv_token: lookup("KV_REST_API_TOKEN"),
                sqlite_path: lookup("DB_PATH").unwrap_or(defaults.cache.sqlite_path),
                ttl_secs,
            },
            site_base_url: lookup("SITE_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.site_base_url),
        }
    }
}
