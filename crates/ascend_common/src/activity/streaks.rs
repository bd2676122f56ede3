//! Streak calculation for the activity calendar.
//!
//! Calculates current/longest streaks and month completion from an `ActivityLog`.

use super::{ActivityLog, DayRecord};
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

/// How far back the streak scan looks
pub const STREAK_SCAN_DAYS: u64 = 365;

/// Heatmap levels run 0..=MAX_INTENSITY
pub const MAX_INTENSITY: u8 = 4;

/// Streak statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreakSummary {
    /// Consecutive active days ending today
    pub current: u32,
    /// Best run seen by the scan
    pub longest: u32,
}

/// Scan backwards from `today` for at most `STREAK_SCAN_DAYS` days.
///
/// A gap on `today` itself does not stop the scan; the first gap after that
/// does. `longest` therefore only covers the runs up to that gap, not the
/// whole history.
pub fn compute_streaks(log: &ActivityLog, today: NaiveDate) -> StreakSummary {
    let mut current = 0u32;
    let mut longest = 0u32;
    let mut run = 0u32;

    for offset in 0..STREAK_SCAN_DAYS {
        let Some(date) = today.checked_sub_days(Days::new(offset)) else {
            break;
        };

        if log.is_active(date) {
            if offset == u64::from(current) {
                current += 1;
            }
            run += 1;
        } else {
            longest = longest.max(run);
            if offset > 0 {
                break;
            }
            run = 0;
        }
    }

    StreakSummary {
        current,
        longest: longest.max(run),
    }
}

/// Every day of the month containing `month`
fn days_of_month(month: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let first = month.with_day(1).unwrap_or(month);
    let m = first.month();
    first.iter_days().take_while(move |d| d.month() == m)
}

/// Percentage of elapsed days in the month of `month` with any completion.
///
/// Days after `today` count toward neither side; a month entirely in the
/// future is 0%.
pub fn month_completion(log: &ActivityLog, month: NaiveDate, today: NaiveDate) -> u8 {
    let (elapsed, active) = days_of_month(month)
        .filter(|d| *d <= today)
        .fold((0u32, 0u32), |(elapsed, active), d| {
            (elapsed + 1, active + u32::from(log.is_active(d)))
        });

    if elapsed == 0 {
        return 0;
    }
    (f64::from(active) / f64::from(elapsed) * 100.0).round() as u8
}

/// Heatmap level for a day, capped at `MAX_INTENSITY`
pub fn intensity(record: Option<&DayRecord>) -> u8 {
    record
        .map(|r| r.completions.min(u32::from(MAX_INTENSITY)) as u8)
        .unwrap_or(0)
}

/// Everything the calendar view shows for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivitySummary {
    /// First day of the displayed month
    pub month: NaiveDate,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub month_completion: u8,
    /// Heatmap level per day of the month, day 1 first
    pub heatmap: Vec<u8>,
}

impl ActivitySummary {
    pub fn compute(log: &ActivityLog, month: NaiveDate, today: NaiveDate) -> Self {
        let streaks = compute_streaks(log, today);
        let heatmap = days_of_month(month).map(|d| intensity(log.get(d))).collect();
        Self {
            month: month.with_day(1).unwrap_or(month),
            current_streak: streaks.current,
            longest_streak: streaks.longest,
            month_completion: month_completion(log, month, today),
            heatmap,
        }
    }

    pub fn active_days(&self) -> usize {
        self.heatmap.iter().filter(|&&level| level > 0).count()
    }
}
