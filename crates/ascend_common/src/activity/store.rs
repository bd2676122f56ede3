//! Activity log persistence.
//!
//! The whole calendar is one JSON object in a single file, keyed by ISO date.

use super::ActivityLog;
use crate::error::StoreError;
use serde_json::error::Category;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the activity log inside the data directory
pub const ACTIVITY_FILE: &str = "habit_completions.json";

/// JSON file holding the activity log
#[derive(Debug, Clone)]
pub struct ActivityStore {
    path: PathBuf,
}

impl ActivityStore {
    /// Store inside `data_dir`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(ACTIVITY_FILE),
        }
    }

    /// Store at the per-user default location
    pub fn default_location() -> Self {
        Self::new(Self::default_dir())
    }

    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("ascend")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the log; a missing file is an empty log
    pub fn load(&self) -> Result<ActivityLog, StoreError> {
        if !self.path.exists() {
            return Ok(ActivityLog::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ActivityLog::new());
        }
        serde_json::from_str(&content).map_err(|e| match e.classify() {
            // Well-formed JSON that breaks the log's own rules
            Category::Data => StoreError::Corrupt(e.to_string()),
            _ => StoreError::Json(e),
        })
    }

    pub fn save(&self, log: &ActivityLog) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(log)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::CompletionKind;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = ActivityStore::new(dir.path());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let store = ActivityStore::new(dir.path().join("sub"));
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        let mut log = ActivityLog::new();
        log.record(CompletionKind::Dungeon, today);
        store.save(&log).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded, log);
        assert!(store.path().ends_with(ACTIVITY_FILE));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let store = ActivityStore::new(dir.path());
        fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(store.load(), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_mismatched_date_is_corrupt() {
        let dir = tempdir().unwrap();
        let store = ActivityStore::new(dir.path());
        fs::write(
            store.path(),
            r#"{"2024-06-09": {"date": "2024-06-10", "completions": 1, "types": []}}"#,
        )
        .unwrap();
        assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_default_dir_is_absolute() {
        assert!(ActivityStore::default_dir().is_absolute());
    }
}
