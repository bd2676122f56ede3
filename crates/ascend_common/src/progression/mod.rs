//! Progression Module
//!
//! Server-side half of the engine.
//!
//! ## Daily dungeon
//!
//! - Three goals per calendar day, seeded from the day of month
//! - Regenerated only when the stored dungeon date is not today
//!
//! ## Completion
//!
//! - Flat +10 XP per completion
//! - Forward-only level walk over `LEVEL_THRESHOLDS`
//! - Aggregate XP and streak mirrored into the user-stats singleton

pub mod ledger;
pub mod levels;
pub mod selector;

pub use ledger::ProgressionLedger;
pub use levels::{LevelThresholds, LEVEL_THRESHOLDS, XP_PER_COMPLETION};
pub use selector::{
    needs_regeneration, seed_index, select_for_day, DailyDungeon, DungeonSelector, DUNGEON_SIZE,
};
