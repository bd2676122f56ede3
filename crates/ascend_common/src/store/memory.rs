//! In-memory goal and stats store.

use super::{GoalRepository, UserStatsRepository};
use crate::error::StoreError;
use crate::model::{Goal, GoalId, UserStats};
use std::sync::Mutex;

/// Vec-backed store; ids are assigned sequentially from 1
#[derive(Debug, Default)]
pub struct MemoryStore {
    goals: Mutex<Vec<Goal>>,
    stats: Mutex<UserStats>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one fresh goal per title
    pub fn with_goals<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let goals = titles
            .into_iter()
            .enumerate()
            .map(|(i, title)| Goal::new(GoalId(i as i64 + 1), title))
            .collect();
        Self {
            goals: Mutex::new(goals),
            stats: Mutex::new(UserStats::default()),
        }
    }

    pub fn insert_goal(&self, title: &str) -> Result<Goal, StoreError> {
        let mut goals = self.goals.lock().map_err(|_| StoreError::Poisoned)?;
        let next = goals.iter().map(|g| g.id.0).max().unwrap_or(0) + 1;
        let goal = Goal::new(GoalId(next), title);
        goals.push(goal.clone());
        Ok(goal)
    }

    /// Replace a goal wholesale (tests use this to set up odd states)
    pub fn put_goal(&self, goal: Goal) -> Result<(), StoreError> {
        let mut goals = self.goals.lock().map_err(|_| StoreError::Poisoned)?;
        match goals.iter_mut().find(|g| g.id == goal.id) {
            Some(existing) => *existing = goal,
            None => {
                goals.push(goal);
                goals.sort_by_key(|g| g.id);
            }
        }
        Ok(())
    }
}

impl GoalRepository for MemoryStore {
    fn all_goals(&self) -> Result<Vec<Goal>, StoreError> {
        let goals = self.goals.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(goals.clone())
    }

    fn goal(&self, id: GoalId) -> Result<Option<Goal>, StoreError> {
        let goals = self.goals.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(goals.iter().find(|g| g.id == id).cloned())
    }

    fn update_goal_progress(
        &self,
        id: GoalId,
        xp: u64,
        level: u8,
    ) -> Result<Option<Goal>, StoreError> {
        let mut goals = self.goals.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(goals.iter_mut().find(|g| g.id == id).map(|goal| {
            goal.xp = xp;
            goal.level = level;
            goal.clone()
        }))
    }
}

impl UserStatsRepository for MemoryStore {
    fn stats(&self) -> Result<UserStats, StoreError> {
        let stats = self.stats.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(stats.clone())
    }

    fn update_stats(&self, stats: &UserStats) -> Result<UserStats, StoreError> {
        let mut current = self.stats.lock().map_err(|_| StoreError::Poisoned)?;
        *current = stats.clone();
        Ok(current.clone())
    }
}
