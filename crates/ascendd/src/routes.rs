//! API routes for ascendd
//!
//! - GET  /api/daily-dungeons  today's dungeon (or the full pool once generated)
//! - POST /api/complete-goal   {"goalId": n} -> {"goal", "updatedStats"}
//! - GET  /api/health          liveness and version

use crate::server::AppState;
use ascend_common::{Completion, Goal, GoalId, ProgressionError};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

type AppStateArc = Arc<AppState>;

// ============================================================================
// Errors
// ============================================================================

/// JSON error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Handler failure mapped onto an HTTP status
#[derive(Debug)]
pub enum ApiError {
    Progression(ProgressionError),
    /// Worker task died before producing a result
    Internal(String),
}

impl From<ProgressionError> for ApiError {
    fn from(e: ProgressionError) -> Self {
        ApiError::Progression(e)
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Progression(e @ ProgressionError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, e.to_string())
            }
            ApiError::Progression(e @ ProgressionError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            // Storage details stay in the log
            ApiError::Progression(ProgressionError::Repository(_)) | ApiError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        match &self {
            ApiError::Progression(e) if status.is_client_error() => {
                warn!("  Rejected ({}): {}", e.kind(), e)
            }
            ApiError::Progression(e) => error!("  Request failed ({}): {}", e.kind(), e),
            ApiError::Internal(e) => error!("  Request failed (internal): {}", e),
        }
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Run blocking store work off the async workers
async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ProgressionError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
}

// ============================================================================
// Dungeon Routes
// ============================================================================

pub fn dungeon_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api/daily-dungeons", get(daily_dungeons))
        .route("/api/complete-goal", post(complete_goal))
}

async fn daily_dungeons(State(state): State<AppStateArc>) -> Result<Json<Vec<Goal>>, ApiError> {
    let today = state.today();
    let selector = state.selector.clone();

    let dungeon = blocking(move || selector.daily_dungeon(today)).await?;
    info!(
        "  Daily dungeon for {}: {} goals (generated: {})",
        today,
        dungeon.goals().len(),
        dungeon.was_generated()
    );
    Ok(Json(dungeon.into_goals()))
}

/// Body of POST /api/complete-goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteGoalRequest {
    #[serde(rename = "goalId", default)]
    pub goal_id: Option<GoalId>,
}

async fn complete_goal(
    State(state): State<AppStateArc>,
    payload: Result<Json<CompleteGoalRequest>, JsonRejection>,
) -> Result<Json<Completion>, ApiError> {
    let Json(req) =
        payload.map_err(|rejection| ProgressionError::Validation(rejection.body_text()))?;
    let goal_id = req
        .goal_id
        .ok_or_else(|| ProgressionError::Validation("goalId is required".to_string()))?;

    let ledger = state.ledger.clone();
    let completion = blocking(move || ledger.complete_goal(goal_id)).await?;
    Ok(Json(completion))
}

// ============================================================================
// Health Routes
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/api/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: ascend_common::VERSION.to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
