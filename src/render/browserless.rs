use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::config::RenderConfig;
use crate::render::RenderClient;
use crate::error::{Result, EngineError};

/// Longest body excerpt carried in an upstream error
const EXCERPT_CHARS: usize = 200;

/// Browserless `/content` client
pub struct BrowserlessClient {
    client: Client,
    config: RenderConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentRequest<'a> {
    url: &'a str,
    wait_for: u64,
    goto_options: GotoOptions<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GotoOptions<'a> {
    wait_until: &'a str,
}

impl BrowserlessClient {
    /// Create new Browserless client
    pub fn new(config: RenderConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| EngineError::Other(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!("BROWSERLESS_API_KEY: {}", config.masked_key());

        Ok(Self { client, config })
    }

    fn transport_error(e: reqwest::Error) -> EngineError {
        let message = if e.is_timeout() {
            format!("timed out: {}", e)
        } else {
            e.to_string()
        };
        EngineError::Upstream { status: None, message }
    }
}

/// Cut `body` to at most `EXCERPT_CHARS` characters
fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(EXCERPT_CHARS) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

#[async_trait]
impl RenderClient for BrowserlessClient {
    async fn render(&self, url: &str) -> Result<String> {
        let token = match self.config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key.trim(),
            _ => {
                return Err(EngineError::Configuration(
                    "BROWSERLESS_API_KEY is not set; create a key at https://browserless.io \
                     and export it before rendering pages"
                        .to_string(),
                ))
            }
        };

        let request = ContentRequest {
            url,
            wait_for: self.config.wait_for_ms,
            goto_options: GotoOptions {
                wait_until: &self.config.wait_until,
            },
        };

        tracing::debug!("Rendering {} via {}", url, self.config.endpoint);

        let response = self.client
            .post(&self.config.endpoint)
            .query(&[("token", token)])
            .json(&request)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("Render of {} failed with HTTP {}", url, status);
            return Err(EngineError::Upstream {
                status: Some(status.as_u16()),
                message: excerpt(&body),
            });
        }

        response.text().await.map_err(Self::transport_error)
    }

    fn name(&self) -> &str {
        "browserless"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Query,
        http::StatusCode,
        routing::post,
        Json, Router,
    };
    use serde_json::Value;
    use std::collections::HashMap;

    async fn content_handler(
        Query(query): Query<HashMap<String, String>>,
        Json(body): Json<Value>,
    ) -> (StatusCode, String) {
        if query.get("token").map(String::as_str) != Some("test-token") {
            return (StatusCode::UNAUTHORIZED, "bad token".to_string());
        }
        if body["waitFor"] != 2000 || body["gotoOptions"]["waitUntil"] != "networkidle2" {
            return (StatusCode::BAD_REQUEST, format!("unexpected body {}", body));
        }
        match body["url"].as_str() {
            Some(url) if url.ends_with("/down") => {
                (StatusCode::SERVICE_UNAVAILABLE, "x".repeat(500))
            }
            Some(url) => (StatusCode::OK, format!("<html><h1>{}</h1></html>", url)),
            None => (StatusCode::BAD_REQUEST, "missing url".to_string()),
        }
    }

    async fn spawn_render() -> String {
        let app = Router::new().route("/content", post(content_handler));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/content", addr)
    }

    fn config(endpoint: String, key: Option<&str>) -> RenderConfig {
        RenderConfig {
            api_key: key.map(str::to_string),
            endpoint,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("  short  "), "short");

        let long = "é".repeat(300);
        let cut = excerpt(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), EXCERPT_CHARS + 3);
    }

    #[test]
    fn test_request_shape() {
        let request = ContentRequest {
            url: "https://gamersclub.com.br/player/1",
            wait_for: 2000,
            goto_options: GotoOptions { wait_until: "networkidle2" },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "url": "https://gamersclub.com.br/player/1",
                "waitFor": 2000,
                "gotoOptions": { "waitUntil": "networkidle2" }
            })
        );
    }

    #[tokio::test]
    async fn test_render_without_key() {
        let client = BrowserlessClient::new(config("http://127.0.0.1:9/content".into(), Some(" "))).unwrap();

        let err = client.render("https://example.com").await.unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_render_ok() {
        let endpoint = spawn_render().await;
        let client = BrowserlessClient::new(config(endpoint, Some("test-token"))).unwrap();

        let html = client.render("https://gamersclub.com.br/player/1").await.unwrap();
        assert_eq!(html, "<html><h1>https://gamersclub.com.br/player/1</h1></html>");
    }

    #[tokio::test]
    async fn test_render_non_success() {
        let endpoint = spawn_render().await;
        let client = BrowserlessClient::new(config(endpoint, Some("test-token"))).unwrap();

        let err = client.render("https://gamersclub.com.br/down").await.unwrap_err();
        assert_eq!(err.upstream_status(), Some(503));
        match err {
            EngineError::Upstream { message, .. } => assert!(message.len() <= EXCERPT_CHARS + 3),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_render_transport_failure() {
        let client = BrowserlessClient::new(config("http://127.0.0.1:9/content".into(), Some("k"))).unwrap();

        let err = client.render("https://gamersclub.com.br/player/1").await.unwrap_err();
        assert!(err.is_upstream());
        assert_eq!(err.upstream_status(), None);
    }
}
