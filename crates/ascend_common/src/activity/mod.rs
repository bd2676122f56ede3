//! Activity Module
//!
//! Client-side calendar of daily completions.
//!
//! - `ActivityLog`: sparse `date -> DayRecord` map, one record per date
//! - `ActivityStore`: JSON file persistence under a fixed file name
//! - `ActivityTracker`: records completions and notifies observers
//! - `streaks`: current/longest streak and month completion

pub mod store;
pub mod streaks;
pub mod tracker;

pub use store::{ActivityStore, ACTIVITY_FILE};
pub use streaks::{
    compute_streaks, intensity, month_completion, ActivitySummary, StreakSummary, MAX_INTENSITY,
    STREAK_SCAN_DAYS,
};
pub use tracker::{ActivityTracker, CompletionObserver};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// What kind of activity a completion came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionKind {
    Quest,
    Dungeon,
    Custom,
}

impl CompletionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionKind::Quest => "quest",
            CompletionKind::Dungeon => "dungeon",
            CompletionKind::Custom => "custom",
        }
    }
}

impl Default for CompletionKind {
    fn default() -> Self {
        CompletionKind::Quest
    }
}

impl fmt::Display for CompletionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompletionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quest" => Ok(CompletionKind::Quest),
            "dungeon" => Ok(CompletionKind::Dungeon),
            "custom" => Ok(CompletionKind::Custom),
            other => Err(format!("unknown completion kind '{}' (quest, dungeon, custom)", other)),
        }
    }
}

/// Completions on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub completions: u32,
    #[serde(default)]
    pub types: BTreeSet<CompletionKind>,
}

impl DayRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            completions: 0,
            types: BTreeSet::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.completions > 0
    }
}

/// Sparse calendar keyed by ISO date.
///
/// Every key equals the `date` of its record; files that disagree are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<NaiveDate, DayRecord>",
    into = "BTreeMap<NaiveDate, DayRecord>"
)]
pub struct ActivityLog {
    days: BTreeMap<NaiveDate, DayRecord>,
}

impl TryFrom<BTreeMap<NaiveDate, DayRecord>> for ActivityLog {
    type Error = String;

    fn try_from(days: BTreeMap<NaiveDate, DayRecord>) -> Result<Self, Self::Error> {
        if let Some((key, record)) = days.iter().find(|(key, record)| **key != record.date) {
            return Err(format!(
                "entry {} holds a record dated {}",
                key, record.date
            ));
        }
        Ok(Self { days })
    }
}

impl From<ActivityLog> for BTreeMap<NaiveDate, DayRecord> {
    fn from(log: ActivityLog) -> Self {
        log.days
    }
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one completion of `kind` on `date`
    pub fn record(&mut self, kind: CompletionKind, date: NaiveDate) -> &DayRecord {
        let record = self.days.entry(date).or_insert_with(|| DayRecord::new(date));
        record.completions = record.completions.saturating_add(1);
        record.types.insert(kind);
        record
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.days.get(&date)
    }

    pub fn completions_on(&self, date: NaiveDate) -> u32 {
        self.days.get(&date).map(|r| r.completions).unwrap_or(0)
    }

    pub fn is_active(&self, date: NaiveDate) -> bool {
        self.completions_on(date) > 0
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn days(&self) -> impl Iterator<Item = &DayRecord> {
        self.days.values()
    }
}

impl FromIterator<DayRecord> for ActivityLog {
    fn from_iter<I: IntoIterator<Item = DayRecord>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().map(|r| (r.date, r)).collect(),
        }
    }
}
