//! Completion recording with observer notification.

use super::{ActivityLog, ActivityStore, ActivitySummary, CompletionKind, DayRecord};
use crate::error::StoreError;
use chrono::NaiveDate;
use std::error::Error;
use tracing::{debug, warn};

pub type ObserverError = Box<dyn Error + Send + Sync>;

/// Told about every recorded completion.
///
/// Observers run synchronously after the log is saved. No order between
/// observers is promised and a failing observer never fails the write.
pub trait CompletionObserver: Send + Sync {
    fn name(&self) -> &str;

    fn on_completion(&self, log: &ActivityLog, record: &DayRecord) -> Result<(), ObserverError>;
}

/// Records completions into an `ActivityStore`
pub struct ActivityTracker {
    store: ActivityStore,
    observers: Vec<Box<dyn CompletionObserver>>,
}

impl ActivityTracker {
    pub fn new(store: ActivityStore) -> Self {
        Self {
            store,
            observers: Vec::new(),
        }
    }

    pub fn store(&self) -> &ActivityStore {
        &self.store
    }

    pub fn subscribe(&mut self, observer: Box<dyn CompletionObserver>) {
        self.observers.push(observer);
    }

    /// Count one completion of `kind` on `today`, persist, then notify
    pub fn record_completion(
        &self,
        kind: CompletionKind,
        today: NaiveDate,
    ) -> Result<DayRecord, StoreError> {
        let mut log = self.store.load()?;
        let record = log.record(kind, today).clone();
        self.store.save(&log)?;
        debug!(
            "Recorded {} completion on {} ({} today)",
            kind, today, record.completions
        );

        for observer in &self.observers {
            if let Err(e) = observer.on_completion(&log, &record) {
                warn!("Completion observer '{}' failed: {}", observer.name(), e);
            }
        }

        Ok(record)
    }

    /// Streaks and month completion for the month containing `month`
    pub fn summary(&self, month: NaiveDate, today: NaiveDate) -> Result<ActivitySummary, StoreError> {
        let log = self.store.load()?;
        Ok(ActivitySummary::compute(&log, month, today))
    }
}
