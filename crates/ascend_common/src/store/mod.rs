//! Repository seams for goals and the user-stats singleton.
//!
//! The selector and ledger only talk to these traits. `SqliteStore` backs the
//! daemon; `MemoryStore` backs tests and ad-hoc tooling.
//!
//! Each method is a single read or a single write. Callers compose them into
//! read-modify-write sequences without a transaction, so two concurrent
//! completions can overwrite each other's stats (lost update).

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::StoreError;
use crate::model::{Goal, GoalId, UserStats};

/// Goal collection
pub trait GoalRepository: Send + Sync {
    /// Full pool ordered by id
    fn all_goals(&self) -> Result<Vec<Goal>, StoreError>;

    fn goal(&self, id: GoalId) -> Result<Option<Goal>, StoreError>;

    /// Persist experience and level; `None` when the goal no longer exists
    fn update_goal_progress(
        &self,
        id: GoalId,
        xp: u64,
        level: u8,
    ) -> Result<Option<Goal>, StoreError>;
}

/// The single user-stats record of a deployment
pub trait UserStatsRepository: Send + Sync {
    fn stats(&self) -> Result<UserStats, StoreError>;

    /// Overwrite every field and return the stored record
    fn update_stats(&self, stats: &UserStats) -> Result<UserStats, StoreError>;
}
