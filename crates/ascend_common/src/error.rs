//! Error types for Ascend.

use crate::model::GoalId;
use thiserror::Error;

/// Failures from a goal, user-stats or activity store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid stored value: {0}")]
    Corrupt(String),

    #[error("Store lock poisoned")]
    Poisoned,

    #[error("User stats record missing")]
    MissingStats,
}

/// Failures surfaced by the selector and the progression ledger
#[derive(Error, Debug)]
pub enum ProgressionError {
    #[error("Goal {0} not found")]
    NotFound(GoalId),

    #[error("Repository failure: {0}")]
    Repository(#[from] StoreError),

    #[error("Invalid request: {0}")]
    Validation(String),
}

impl ProgressionError {
    /// Stable machine-readable kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ProgressionError::NotFound(_) => "not_found",
            ProgressionError::Repository(_) => "repository",
            ProgressionError::Validation(_) => "validation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_converts() {
        let err: ProgressionError = StoreError::Poisoned.into();
        assert_eq!(err.kind(), "repository");
        assert!(err.to_string().contains("lock poisoned"));
    }

    #[test]
    fn test_not_found_message() {
        let err = ProgressionError::NotFound(GoalId(42));
        assert_eq!(err.to_string(), "Goal 42 not found");
        assert_eq!(err.kind(), "not_found");
    }
}
