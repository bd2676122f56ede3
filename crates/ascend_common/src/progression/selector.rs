//! Daily dungeon selection.
//!
//! Picks `DUNGEON_SIZE` goals for a calendar day from the full pool. The pick
//! is seeded from the day of month, so it is reproducible for a given pool
//! ordering and day; it is not uniform and may repeat a goal.

use crate::error::ProgressionError;
use crate::model::{Goal, UserStats};
use crate::store::{GoalRepository, UserStatsRepository};
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;
use tracing::{debug, info};

/// Goals per generated dungeon
pub const DUNGEON_SIZE: u32 = 3;

/// Pool index for `offset` on a given day of month.
///
/// `floor(|sin(day + offset) * 10000| mod pool_size)`; `None` for an empty pool.
pub fn seed_index(day: u32, offset: u32, pool_size: usize) -> Option<usize> {
    if pool_size == 0 {
        return None;
    }
    let seed = f64::from(day + offset);
    let x = (seed.sin() * 10_000.0).abs();
    Some((x % pool_size as f64).floor() as usize)
}

/// Pure selection over an ordered pool
pub fn select_for_day(pool: &[Goal], day: u32) -> Vec<Goal> {
    (0..DUNGEON_SIZE)
        .filter_map(|offset| seed_index(day, offset, pool.len()))
        .map(|index| pool[index].clone())
        .collect()
}

/// Whether a new dungeon is due for `today`
pub fn needs_regeneration(stats: &UserStats, today: NaiveDate) -> bool {
    stats.last_dungeon_date != Some(today)
}

/// Outcome of a dungeon request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DailyDungeon {
    /// First request of the day; the stats date was stamped
    Generated(Vec<Goal>),
    /// Already generated today; the full pool is returned
    FullPool(Vec<Goal>),
}

impl DailyDungeon {
    pub fn goals(&self) -> &[Goal] {
        match self {
            DailyDungeon::Generated(goals) | DailyDungeon::FullPool(goals) => goals,
        }
    }

    pub fn into_goals(self) -> Vec<Goal> {
        match self {
            DailyDungeon::Generated(goals) | DailyDungeon::FullPool(goals) => goals,
        }
    }

    pub fn was_generated(&self) -> bool {
        matches!(self, DailyDungeon::Generated(_))
    }
}

/// Chooses today's dungeon from the goal repository
#[derive(Clone)]
pub struct DungeonSelector {
    goals: Arc<dyn GoalRepository>,
    stats: Arc<dyn UserStatsRepository>,
}

impl DungeonSelector {
    pub fn new(goals: Arc<dyn GoalRepository>, stats: Arc<dyn UserStatsRepository>) -> Self {
        Self { goals, stats }
    }

    /// Today's dungeon.
    ///
    /// The previous selection is not persisted: once a dungeon has been
    /// generated for `today`, later calls return the whole pool.
    pub fn daily_dungeon(&self, today: NaiveDate) -> Result<DailyDungeon, ProgressionError> {
        let pool = self.goals.all_goals()?;
        let stats = self.stats.stats()?;

        if !needs_regeneration(&stats, today) {
            debug!("Dungeon already generated for {}, returning {} goals", today, pool.len());
            return Ok(DailyDungeon::FullPool(pool));
        }

        let picked = select_for_day(&pool, today.day());

        // Only the date changes; XP and streak are written back as read
        self.stats.update_stats(&UserStats {
            last_dungeon_date: Some(today),
            ..stats
        })?;

        info!(
            "Generated dungeon for {} from pool of {}: {:?}",
            today,
            pool.len(),
            picked.iter().map(|g| g.id.0).collect::<Vec<_>>()
        );
        Ok(DailyDungeon::Generated(picked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_seed_index_known_values() {
        assert_eq!(seed_index(15, 0, 10), Some(2));
        assert_eq!(seed_index(15, 1, 10), Some(9));
        assert_eq!(seed_index(15, 2, 10), Some(3));
        assert_eq!(seed_index(1, 0, 5), Some(4));
        assert_eq!(seed_index(31, 2, 7), Some(3));
    }

    #[test]
    fn test_seed_index_bounds() {
        assert_eq!(seed_index(3, 0, 0), None);
        assert_eq!(seed_index(3, 0, 1), Some(0));
        for d in 1..=31 {
            for off in 0..DUNGEON_SIZE {
                assert!(seed_index(d, off, 4).unwrap() < 4);
            }
        }
    }

    #[test]
    fn test_small_pool_repeats_goals() {
        let pool = MemoryStore::with_goals(["only"]).all_goals().unwrap();
        let picked = select_for_day(&pool, 12);
        assert_eq!(picked.len(), 3);
        assert!(picked.iter().all(|g| g.title == "only"));
    }

    #[test]
    fn test_regenerates_when_date_absent() {
        let store = Arc::new(MemoryStore::with_goals((1..=10).map(|i| format!("g{}", i))));
        let selector = DungeonSelector::new(store.clone(), store.clone());

        let dungeon = selector.daily_dungeon(day(15)).unwrap();
        assert!(dungeon.was_generated());
        let ids: Vec<i64> = dungeon.goals().iter().map(|g| g.id.0).collect();
        // Indices 2, 9, 3 in a pool ordered by id 1..=10
        assert_eq!(ids, vec![3, 10, 4]);
        assert_eq!(store.stats().unwrap().last_dungeon_date, Some(day(15)));
    }

    #[test]
    fn test_second_call_same_day_returns_full_pool() {
        let store = Arc::new(MemoryStore::with_goals(["a", "b", "c", "d", "e"]));
        let selector = DungeonSelector::new(store.clone(), store.clone());

        selector.daily_dungeon(day(2)).unwrap();
        let second = selector.daily_dungeon(day(2)).unwrap();
        assert!(!second.was_generated());
        assert_eq!(second.goals().len(), 5);
    }

    #[test]
    fn test_regeneration_keeps_xp_and_streak() {
        let store = Arc::new(MemoryStore::with_goals(["a", "b"]));
        store
            .update_stats(&UserStats {
                total_xp: 70,
                streak: 7,
                last_dungeon_date: Some(day(1)),
            })
            .unwrap();
        let selector = DungeonSelector::new(store.clone(), store.clone());

        assert!(selector.daily_dungeon(day(2)).unwrap().was_generated());
        let stats = store.stats().unwrap();
        assert_eq!(stats.total_xp, 70);
        assert_eq!(stats.streak, 7);
        assert_eq!(stats.last_dungeon_date, Some(day(2)));
    }

    #[test]
    fn test_empty_pool_generates_nothing() {
        let store = Arc::new(MemoryStore::new());
        let selector = DungeonSelector::new(store.clone(), store.clone());
        let dungeon = selector.daily_dungeon(day(9)).unwrap();
        assert!(dungeon.was_generated());
        assert!(dungeon.goals().is_empty());
    }
}
