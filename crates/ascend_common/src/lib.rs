//! Shared types and engine for Ascend components.
//!
//! - `progression`: daily dungeon selection and goal completion (daemon side)
//! - `activity`: completion calendar and streaks (client side)
//! - `store`: repository traits plus SQLite and in-memory implementations

pub mod activity;
pub mod error;
pub mod model;
pub mod progression;
pub mod store;

pub use activity::{ActivityLog, ActivityStore, ActivityTracker, CompletionKind, DayRecord};
pub use error::{ProgressionError, StoreError};
pub use model::{Completion, Goal, GoalId, UserStats};
pub use progression::{DailyDungeon, DungeonSelector, ProgressionLedger};
pub use store::{GoalRepository, MemoryStore, SqliteStore, UserStatsRepository};

/// Crate version, shared by the daemon and CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Address the daemon listens on unless configured otherwise
pub const DEFAULT_BIND: &str = "127.0.0.1:7870";
