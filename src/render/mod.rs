pub mod browserless;

use async_trait::async_trait;
use crate::error::Result;

pub use browserless::BrowserlessClient;

/// Trait for headless-browser render services
#[async_trait]
pub trait RenderClient: Send + Sync {
    /// Render `url` and return the resulting HTML.
    ///
    /// Fails with `Configuration` when no credential is set and with
    /// `Upstream` on transport errors or non-2xx replies. No retries.
    async fn render(&self, url: &str) -> Result<String>;

    /// Get client name for logging
    fn name(&self) -> &str;
}
