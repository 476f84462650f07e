//! # Gamers Club Engine
//!
//! Cached scraping of Gamers Club player pages:
//! - Browserless rendering to get past the site's bot protection
//! - Pattern-based extraction of profile, match history and stats
//! - TTL cache (Redis over REST, or SQLite locally), 300s by default
//! - Mock data when no render key is configured
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gamersclub_engine::{EngineConfig, PlayerEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = PlayerEngine::from_config(EngineConfig::from_env()).await?;
//!
//!     let profile = engine.profile("1969509").await?;
//!     println!("{:?} (cached: {})", profile.data.nickname, profile.cached);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod cache;
pub mod config;
pub mod render;
pub mod extract;
pub mod mock;
pub mod engine;
pub mod error;
pub mod api;

#[cfg(feature = "server")]
pub mod server;

// Re-export primary types
pub use core::{Fetched, Match, PlayerProfile, PlayerStats};
pub use engine::PlayerEngine;
pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use cache::CacheStore;
pub use render::RenderClient;
pub use extract::{extract_matches, extract_profile, extract_stats};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
