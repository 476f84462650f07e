use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use crate::cache::CacheStore;
use crate::error::{Result, EngineError};

/// Redis over HTTP, Upstash REST protocol
///
/// Every command is POSTed to the base URL as a JSON array, e.g.
/// `["SET", "stats:1", "{...}", "EX", "300"]`. Values are stored as JSON text
/// and expiry is enforced server-side.
pub struct KvRestCache {
    client: Client,
    base_url: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct CommandResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

impl KvRestCache {
    /// Create new KV REST cache
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| EngineError::CacheTransport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    async fn command(&self, args: Value) -> Result<Option<Value>> {
        let response = self.client
            .post(&self.base_url)
            .bearer_auth(&self.token)
            .json(&args)
            .send()
            .await
            .map_err(|e| EngineError::CacheTransport(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body: CommandResponse = response
            .json()
            .await
            .map_err(|e| EngineError::CacheTransport(format!("Invalid JSON (HTTP {}): {}", status, e)))?;

        if let Some(error) = body.error {
            return Err(EngineError::CacheTransport(error));
        }

        if !status.is_success() {
            return Err(EngineError::CacheTransport(format!("HTTP {}", status)));
        }

        Ok(body.result)
    }
}

#[async_trait]
impl CacheStore for KvRestCache {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        match self.command(json!(["GET", key])).await? {
            Some(Value::String(text)) => Ok(Some(serde_json::from_str(&text)?)),
            Some(Value::Null) | None => Ok(None),
            // Already-decoded JSON (some proxies unwrap it)
            Some(other) => Ok(Some(other)),
        }
    }

    async fn set(&self, key: &str, value: &Value, ttl_secs: u64) -> Result<()> {
        if ttl_secs == 0 {
            return Err(EngineError::CacheTransport(format!(
                "refusing to cache '{}' with zero ttl",
                key
            )));
        }

        let text = serde_json::to_string(value)?;
        self.command(json!(["SET", key, text, "EX", ttl_secs.to_string()]))
            .await?;

        Ok(())
    }

    fn name(&self) -> &str {
        "kv-rest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::HeaderMap, routing::post, Json, Router};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    type Store = Arc<Mutex<HashMap<String, String>>>;

    /// Minimal Redis REST stand-in: GET/SET without expiry, bearer auth
    async fn kv_handler(
        State(store): State<Store>,
        headers: HeaderMap,
        Json(args): Json<Vec<String>>,
    ) -> Json<Value> {
        if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer secret") {
            return Json(json!({ "error": "WRONGPASS invalid token" }));
        }

        let mut store = store.lock().unwrap();
        match args.first().map(String::as_str) {
            Some("GET") => Json(json!({ "result": store.get(&args[1]) })),
            Some("SET") => {
                store.insert(args[1].clone(), args[2].clone());
                Json(json!({ "result": "OK" }))
            }
            _ => Json(json!({ "error": "ERR unknown command" })),
        }
    }

    async fn spawn_kv() -> String {
        let store: Store = Arc::new(Mutex::new(HashMap::new()));
        let app = Router::new().route("/", post(kv_handler)).with_state(store);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_kv_set_and_get() {
        let url = spawn_kv().await;
        let cache = KvRestCache::new(&url, "secret").unwrap();
        let value = json!({ "kda": 1.8, "kills": 10 });

        cache.set("stats:1", &value, 300).await.unwrap();
        assert_eq!(cache.get("stats:1").await.unwrap(), Some(value));
        assert!(cache.get("stats:2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_kv_error_reply() {
        let url = spawn_kv().await;
        let cache = KvRestCache::new(&url, "wrong").unwrap();

        let result = cache.get("stats:1").await;
        assert!(matches!(result, Err(EngineError::CacheTransport(_))));
    }

    #[tokio::test]
    async fn test_kv_unreachable() {
        // Nothing listens on port 9 locally
        let cache = KvRestCache::new("http://127.0.0.1:9", "secret").unwrap();

        let result = cache.set("stats:1", &json!({}), 300).await;
        assert!(matches!(result, Err(EngineError::CacheTransport(_))));
    }
}
