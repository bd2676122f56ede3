//! Command handlers for ascendctl.

use anyhow::{anyhow, Context, Result};
use ascend_common::activity::{
    compute_streaks, ActivityLog, ActivityStore, ActivityTracker, CompletionKind,
    CompletionObserver, DayRecord,
};
use ascend_common::activity::tracker::ObserverError;
use ascend_common::GoalId;
use chrono::NaiveDate;
use tracing::debug;

use crate::client::AscendClient;
use crate::display;

/// Prints the refreshed streak after each recorded completion
pub struct StreakConsole {
    today: NaiveDate,
}

impl StreakConsole {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl CompletionObserver for StreakConsole {
    fn name(&self) -> &str {
        "streak-console"
    }

    fn on_completion(&self, log: &ActivityLog, _record: &DayRecord) -> Result<(), ObserverError> {
        display::print_streak_line(&compute_streaks(log, self.today));
        Ok(())
    }
}

/// Tracker over `store` with the console observer attached
pub fn tracker_for(store: ActivityStore, today: NaiveDate) -> ActivityTracker {
    let mut tracker = ActivityTracker::new(store);
    tracker.subscribe(Box::new(StreakConsole::new(today)));
    tracker
}

/// Parse a "YYYY-MM" month into its first day
pub fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid month '{}', expected YYYY-MM", s))
}

/// Handle status command
pub async fn handle_status(client: &AscendClient) -> Result<()> {
    let health = client.health().await?;
    display::print_health(client.base_url(), &health);
    Ok(())
}

/// Handle dungeon command
pub async fn handle_dungeon(client: &AscendClient, today: NaiveDate) -> Result<()> {
    let goals = client.daily_dungeon().await?;
    display::print_dungeon(&goals, today);
    Ok(())
}

/// Handle complete command
///
/// The local calendar is only touched once the daemon accepted the completion.
pub async fn handle_complete(
    client: &AscendClient,
    tracker: &ActivityTracker,
    goal_id: GoalId,
    today: NaiveDate,
) -> Result<()> {
    debug!("Completing goal {} via {}", goal_id, client.base_url());
    let completion = client.complete_goal(goal_id).await?;
    display::print_completion(&completion);

    let record = tracker
        .record_completion(CompletionKind::Dungeon, today)
        .with_context(|| format!("Failed to update {}", tracker.store().path().display()))?;
    display::print_recorded(&record);
    Ok(())
}

/// Handle record command
pub fn handle_record(
    tracker: &ActivityTracker,
    kind: CompletionKind,
    today: NaiveDate,
) -> Result<DayRecord> {
    let record = tracker
        .record_completion(kind, today)
        .with_context(|| format!("Failed to update {}", tracker.store().path().display()))?;
    display::print_recorded(&record);
    Ok(record)
}

/// Handle streaks command
pub fn handle_streaks(
    tracker: &ActivityTracker,
    month: Option<&str>,
    today: NaiveDate,
) -> Result<()> {
    let month = match month {
        Some(m) => parse_month(m)?,
        None => today,
    };
    let summary = tracker
        .summary(month, today)
        .with_context(|| format!("Failed to read {}", tracker.store().path().display()))?;
    display::print_summary(&summary);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(
            parse_month("2024-02").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("feb").is_err());
    }
}
