//! Ascend Daemon - daily dungeon and goal progression server
//!
//! Serves the goal pool and user stats over HTTP from a local SQLite database.

use anyhow::{Context, Result};
use ascend_common::SqliteStore;
use ascendd::config::Config;
use ascendd::server::{self, AppState};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Read config before logging exists so its level can apply
    let config_path = Config::path();
    let loaded = Config::load_from_path(&config_path);
    let config = loaded.as_ref().cloned().unwrap_or_default();

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Ascend Daemon v{} starting", ascend_common::VERSION);
    match &loaded {
        Ok(_) => info!("Loaded config from {}", config_path.display()),
        Err(e) => warn!("Config not loaded, using defaults: {:#}", e),
    }

    let db_path = config.storage.resolved_db_path();
    let store = Arc::new(
        SqliteStore::open(&db_path)
            .with_context(|| format!("Failed to open goal store at {}", db_path.display()))?,
    );
    info!("Goal store: {}", db_path.display());

    store
        .seed_goals(&config.seed_goals)
        .context("Failed to seed goals")?;
    info!("{} goals in pool", store.goal_count()?);

    let state = AppState::new(store.clone(), store);
    server::run(state, &config.server.bind).await
}
