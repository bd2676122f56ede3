//! Goal and user-stats records shared by the daemon and the CLI.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque goal identifier (row id in the goals table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(pub i64);

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A trackable task carrying experience and level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub title: String,
    pub xp: u64,
    /// Index into the level threshold table
    pub level: u8,
}

impl Goal {
    /// Fresh goal at level 0 with no experience
    pub fn new(id: GoalId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            xp: 0,
            level: 0,
        }
    }
}

/// Aggregate statistics for the single player of a deployment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_xp: u64,
    /// Bumped on every completion, never reset
    pub streak: u64,
    pub last_dungeon_date: Option<NaiveDate>,
}

/// Result of completing a goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub goal: Goal,
    #[serde(rename = "updatedStats")]
    pub updated_stats: UserStats,
}
