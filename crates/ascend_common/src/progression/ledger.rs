//! Goal completion: XP, level walk, and aggregate user stats.

use super::levels::{LevelThresholds, XP_PER_COMPLETION};
use crate::error::ProgressionError;
use crate::model::{Completion, GoalId, UserStats};
use crate::store::{GoalRepository, UserStatsRepository};
use std::sync::Arc;
use tracing::info;

/// Applies completions to goals and mirrors them into user stats
#[derive(Clone)]
pub struct ProgressionLedger {
    goals: Arc<dyn GoalRepository>,
    stats: Arc<dyn UserStatsRepository>,
    thresholds: LevelThresholds,
}

impl ProgressionLedger {
    pub fn new(goals: Arc<dyn GoalRepository>, stats: Arc<dyn UserStatsRepository>) -> Self {
        Self {
            goals,
            stats,
            thresholds: LevelThresholds::STANDARD,
        }
    }

    /// Mark a goal complete.
    ///
    /// The goal write and the stats write are separate; if the second one
    /// fails the goal keeps its new XP and the aggregate stats lag behind.
    pub fn complete_goal(&self, goal_id: GoalId) -> Result<Completion, ProgressionError> {
        let goal = self
            .goals
            .goal(goal_id)?
            .ok_or(ProgressionError::NotFound(goal_id))?;

        let previous_level = goal.level;
        let new_xp = goal.xp.saturating_add(XP_PER_COMPLETION);
        let new_level = self.thresholds.advance(previous_level, new_xp);

        let goal = self
            .goals
            .update_goal_progress(goal_id, new_xp, new_level)?
            .ok_or(ProgressionError::NotFound(goal_id))?;

        if goal.level > previous_level {
            info!("Goal {} reached level {}", goal_id, goal.level);
        }

        let stats = self.stats.stats()?;
        let updated_stats = self.stats.update_stats(&UserStats {
            total_xp: stats.total_xp.saturating_add(XP_PER_COMPLETION),
            streak: stats.streak.saturating_add(1),
            last_dungeon_date: stats.last_dungeon_date,
        })?;

        info!(
            "Completed goal {}: xp {} level {}, total_xp {} streak {}",
            goal_id, goal.xp, goal.level, updated_stats.total_xp, updated_stats.streak
        );

        Ok(Completion {
            goal,
            updated_stats,
        })
    }
}
