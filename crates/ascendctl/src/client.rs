//! HTTP client for communicating with ascendd.

use anyhow::{anyhow, Context, Result};
use ascend_common::{Completion, Goal, GoalId};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Default daemon URL
pub const DEFAULT_URL: &str = "http://127.0.0.1:7870";

/// Daemon health, as returned by GET /api/health
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the ascendd HTTP API
pub struct AscendClient {
    http: reqwest::Client,
    base_url: String,
}

impl AscendClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Today's dungeon, or the whole pool when it was already generated
    pub async fn daily_dungeon(&self) -> Result<Vec<Goal>> {
        let response = self
            .http
            .get(self.endpoint("/api/daily-dungeons"))
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;
        decode(response).await
    }

    pub async fn complete_goal(&self, goal_id: GoalId) -> Result<Completion> {
        let response = self
            .http
            .post(self.endpoint("/api/complete-goal"))
            .json(&json!({ "goalId": goal_id }))
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;
        decode(response).await
    }

    pub async fn health(&self) -> Result<Health> {
        let response = self
            .http
            .get(self.endpoint("/api/health"))
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;
        decode(response).await
    }

    fn unreachable(&self, e: reqwest::Error) -> anyhow::Error {
        anyhow!(
            "Cannot reach ascendd at {}: {}\n\n\
             Is the daemon running? Start it with: ascendd",
            self.base_url,
            e
        )
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await.context("Failed to read daemon response")?;
    if !status.is_success() {
        return Err(anyhow!("{}", error_message(status, &body)));
    }
    serde_json::from_str(&body).context("Unexpected response from daemon")
}

/// Human-readable message for a failed API call
pub fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) => format!("{} ({})", err.error, status.as_u16()),
        Err(_) => format!("Daemon returned {}", status),
    }
}
