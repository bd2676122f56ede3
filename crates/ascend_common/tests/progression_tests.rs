//! Progression Tests
//!
//! Daily dungeon and goal completion against the SQLite store.
//!
//! ## Scenarios
//!
//! 1. First request of a day regenerates and stamps the date
//! 2. Second request the same day falls back to the full pool
//! 3. Date rollover regenerates again
//! 4. Completions walk levels at 50 and 150 XP
//! 5. Completion of an unknown goal is NotFound and writes nothing

use ascend_common::progression::{seed_index, DungeonSelector, ProgressionLedger};
use ascend_common::store::{GoalRepository, SqliteStore, UserStatsRepository};
use ascend_common::{GoalId, ProgressionError, UserStats};
use chrono::NaiveDate;
use std::sync::Arc;
use tempfile::tempdir;

fn store_with_goals(n: usize) -> Arc<SqliteStore> {
    let store = SqliteStore::open_in_memory().unwrap();
    for i in 1..=n {
        store.insert_goal(&format!("goal {}", i)).unwrap();
    }
    Arc::new(store)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Daily dungeon
// ============================================================================

#[test]
fn test_dungeon_generated_once_per_day() {
    let store = store_with_goals(7);
    let selector = DungeonSelector::new(store.clone(), store.clone());
    let today = date(2024, 9, 19);

    let first = selector.daily_dungeon(today).unwrap();
    assert!(first.was_generated());
    assert_eq!(first.goals().len(), 3);
    assert_eq!(store.stats().unwrap().last_dungeon_date, Some(today));

    let second = selector.daily_dungeon(today).unwrap();
    assert!(!second.was_generated());
    assert_eq!(second.goals().len(), 7);
}

#[test]
fn test_dungeon_selection_matches_seed_index() {
    let store = store_with_goals(7);
    let pool = store.all_goals().unwrap();
    let selector = DungeonSelector::new(store.clone(), store.clone());

    let dungeon = selector.daily_dungeon(date(2024, 9, 19)).unwrap();
    let expected: Vec<_> = (0..3)
        .map(|off| pool[seed_index(19, off, pool.len()).unwrap()].clone())
        .collect();
    assert_eq!(dungeon.goals(), expected.as_slice());
}

#[test]
fn test_same_day_of_month_is_deterministic_across_months() {
    let a = store_with_goals(10);
    let b = store_with_goals(10);
    let first = DungeonSelector::new(a.clone(), a.clone())
        .daily_dungeon(date(2024, 3, 8))
        .unwrap();
    let second = DungeonSelector::new(b.clone(), b.clone())
        .daily_dungeon(date(2025, 11, 8))
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_rollover_regenerates() {
    let store = store_with_goals(5);
    let selector = DungeonSelector::new(store.clone(), store.clone());

    selector.daily_dungeon(date(2024, 12, 31)).unwrap();
    let next = selector.daily_dungeon(date(2025, 1, 1)).unwrap();
    assert!(next.was_generated());
    assert_eq!(store.stats().unwrap().last_dungeon_date, Some(date(2025, 1, 1)));
}

#[test]
fn test_same_day_number_other_month_regenerates() {
    let store = store_with_goals(5);
    let selector = DungeonSelector::new(store.clone(), store.clone());

    selector.daily_dungeon(date(2024, 4, 5)).unwrap();
    assert!(selector.daily_dungeon(date(2024, 5, 5)).unwrap().was_generated());
}

// ============================================================================
// Completion
// ============================================================================

#[test]
fn test_levels_at_five_and_fifteen_completions() {
    let store = store_with_goals(1);
    let ledger = ProgressionLedger::new(store.clone(), store.clone());
    let id = GoalId(1);

    let mut levels = Vec::new();
    for _ in 0..15 {
        levels.push(ledger.complete_goal(id).unwrap().goal.level);
    }

    assert_eq!(levels[3], 0, "40 XP");
    assert_eq!(levels[4], 1, "50 XP");
    assert_eq!(levels[13], 1, "140 XP");
    assert_eq!(levels[14], 2, "150 XP");

    let goal = store.goal(id).unwrap().unwrap();
    assert_eq!(goal.xp, 150);
    assert_eq!(goal.level, 2);
}

#[test]
fn test_completion_mirrors_into_stats() {
    let store = store_with_goals(3);
    let day = date(2024, 9, 19);
    store
        .update_stats(&UserStats {
            total_xp: 100,
            streak: 4,
            last_dungeon_date: Some(day),
        })
        .unwrap();
    let ledger = ProgressionLedger::new(store.clone(), store.clone());

    let done = ledger.complete_goal(GoalId(2)).unwrap();
    assert_eq!(done.goal.id, GoalId(2));
    assert_eq!(done.updated_stats.total_xp, 110);
    assert_eq!(done.updated_stats.streak, 5);
    assert_eq!(done.updated_stats.last_dungeon_date, Some(day));
    assert_eq!(store.stats().unwrap(), done.updated_stats);
}

#[test]
fn test_unknown_goal_writes_nothing() {
    let store = store_with_goals(2);
    let ledger = ProgressionLedger::new(store.clone(), store.clone());

    let err = ledger.complete_goal(GoalId(40)).unwrap_err();
    assert!(matches!(err, ProgressionError::NotFound(GoalId(40))));
    assert_eq!(store.stats().unwrap(), UserStats::default());
    assert!(store.all_goals().unwrap().iter().all(|g| g.xp == 0));
}

#[test]
fn test_state_survives_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ascend.db");
    {
        let store = Arc::new(SqliteStore::open(&path).unwrap());
        store.insert_goal("journal").unwrap();
        let ledger = ProgressionLedger::new(store.clone(), store.clone());
        for _ in 0..6 {
            ledger.complete_goal(GoalId(1)).unwrap();
        }
    }

    let store = SqliteStore::open(&path).unwrap();
    let goal = store.goal(GoalId(1)).unwrap().unwrap();
    assert_eq!(goal.xp, 60);
    assert_eq!(goal.level, 1);
    assert_eq!(store.stats().unwrap().streak, 6);
}
