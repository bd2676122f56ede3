//! HTTP server for ascendd

use crate::routes;
use anyhow::{Context, Result};
use ascend_common::store::{GoalRepository, UserStatsRepository};
use ascend_common::{DungeonSelector, ProgressionLedger};
use axum::Router;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Source of "today" for dungeon selection
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Local calendar date
pub fn local_clock() -> Clock {
    Arc::new(|| Local::now().date_naive())
}

/// Application state shared across handlers
pub struct AppState {
    pub selector: DungeonSelector,
    pub ledger: ProgressionLedger,
    pub clock: Clock,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(goals: Arc<dyn GoalRepository>, stats: Arc<dyn UserStatsRepository>) -> Self {
        Self {
            selector: DungeonSelector::new(goals.clone(), stats.clone()),
            ledger: ProgressionLedger::new(goals, stats),
            clock: local_clock(),
            start_time: Instant::now(),
        }
    }

    /// Replace the clock (tests pin the date)
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }
}

/// All routes with tracing and permissive CORS for the browser client
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::dungeon_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server
pub async fn run(state: AppState, bind: &str) -> Result<()> {
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    info!("Listening on http://{}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down gracefully");
}
