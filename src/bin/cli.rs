use clap::{Parser, Subcommand};
use gamersclub_engine::{cache::SqliteCache, EngineConfig, PlayerEngine};

#[derive(Parser)]
#[command(name = "gamersclub-cli")]
#[command(about = "Gamers Club player lookup", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// SQLite cache path (overrides DB_PATH)
    #[arg(short, long)]
    db: Option<String>,

    /// Print raw JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a player's profile
    Profile {
        player_id: String,
    },

    /// List a player's finished matches
    Matches {
        player_id: String,

        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// Show a player's stats
    Stats {
        player_id: String,
    },

    /// Remove expired entries from the SQLite cache
    Cleanup,
}

fn show<T: std::fmt::Debug>(label: &str, value: &Option<T>) {
    match value {
        Some(v) => println!("   {}: {:?}", label, v),
        None => println!("   {}: N/A", label),
    }
}

async fn build_engine(config: EngineConfig) -> anyhow::Result<PlayerEngine> {
    let engine = PlayerEngine::from_config(config).await?;
    if engine.is_mock() {
        println!("⚠️  BROWSERLESS_API_KEY not set, showing mock data");
    }
    Ok(engine)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = EngineConfig::from_env();
    if let Some(db) = cli.db {
        config.cache.sqlite_path = db;
    }

    match cli.command {
        Commands::Profile { player_id } => {
            let engine = build_engine(config).await?;
            let result = engine.profile(&player_id).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("👤 Player {}", player_id);
                show("Nickname", &result.data.nickname);
                show("Level", &result.data.level);
                show("KDA", &result.data.kda);
                println!("   Cached: {}", result.cached);
            }
        }

        Commands::Matches { player_id, page } => {
            let engine = build_engine(config).await?;
            let result = engine.matches(&player_id, page).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("🏆 Matches for {} (page {}, cached: {})", player_id, page, result.cached);
                for (i, m) in result.data.iter().enumerate() {
                    println!("   {}. {}", i + 1, m.display());
                }
            }
        }

        Commands::Stats { player_id } => {
            let engine = build_engine(config).await?;
            let result = engine.stats(&player_id).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("📊 Stats for {}", player_id);
                show("KDA", &result.data.kda);
                show("Headshot %", &result.data.headshot);
                show("Winrate %", &result.data.winrate);
                show("Kills", &result.data.kills);
                show("Deaths", &result.data.deaths);
                show("Assists", &result.data.assists);
                println!("   Cached: {}", result.cached);
            }
        }

        Commands::Cleanup => {
            let cache = SqliteCache::new(&config.cache.sqlite_path).await?;
            let deleted = cache.cleanup().await?;
            let stats = cache.stats().await?;
            println!("🧹 Deleted {} expired entries ({} left)", deleted, stats.total_entries);
            if let (Some(oldest), Some(newest)) = (stats.oldest_entry, stats.newest_entry) {
                println!("   Oldest: {}", oldest.to_rfc3339());
                println!("   Newest: {}", newest.to_rfc3339());
            }
        }
    }

    Ok(())
}
