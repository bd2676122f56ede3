//! SQLite-backed goal and user-stats store.
//!
//! Location: /var/lib/ascend/ascend.db (system) or <data_local_dir>/ascend/ascend.db (user)

use super::{GoalRepository, UserStatsRepository};
use crate::error::StoreError;
use crate::model::{Goal, GoalId, UserStats};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Goal and stats store backed by SQLite
pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open or create the store at a specific path
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
            db_path: Some(path.to_path_buf()),
        };
        store.init_schema()?;
        debug!("Opened goal store at {:?}", path);
        Ok(store)
    }

    /// Private database that disappears with the store
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let store = Self {
            conn: Mutex::new(Connection::open_in_memory()?),
            db_path: None,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Get the default database path
    pub fn default_path() -> PathBuf {
        // Try system path first, fall back to user path
        let system_path = PathBuf::from("/var/lib/ascend/ascend.db");
        if system_path.parent().map(|p| p.exists()).unwrap_or(false) {
            return system_path;
        }

        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("ascend")
            .join("ascend.db")
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.lock()?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS goals (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                xp INTEGER NOT NULL DEFAULT 0,
                level INTEGER NOT NULL DEFAULT 0
            )
            "#,
            [],
        )?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS user_stats (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                total_xp INTEGER NOT NULL DEFAULT 0,
                streak INTEGER NOT NULL DEFAULT 0,
                last_dungeon_date TEXT
            )
            "#,
            [],
        )?;

        // The singleton row always exists
        conn.execute(
            "INSERT OR IGNORE INTO user_stats (id, total_xp, streak, last_dungeon_date) VALUES (1, 0, 0, NULL)",
            [],
        )?;

        Ok(())
    }

    /// Add a fresh goal at level 0
    pub fn insert_goal(&self, title: &str) -> Result<Goal, StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO goals (title, xp, level) VALUES (?1, 0, 0)",
            params![title],
        )?;
        Ok(Goal::new(GoalId(conn.last_insert_rowid()), title))
    }

    pub fn goal_count(&self) -> Result<usize, StoreError> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM goals", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Insert `titles` only if the goal table is empty; returns how many were added
    pub fn seed_goals(&self, titles: &[String]) -> Result<usize, StoreError> {
        if titles.is_empty() || self.goal_count()? > 0 {
            return Ok(0);
        }
        for title in titles {
            self.insert_goal(title)?;
        }
        info!("Seeded {} goals", titles.len());
        Ok(titles.len())
    }
}

type GoalRow = (i64, String, i64, i64);

fn read_goal_row(row: &Row<'_>) -> rusqlite::Result<GoalRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn goal_from_row((id, title, xp, level): GoalRow) -> Result<Goal, StoreError> {
    Ok(Goal {
        id: GoalId(id),
        title,
        xp: u64::try_from(xp).map_err(|_| StoreError::Corrupt(format!("goal {} xp {}", id, xp)))?,
        level: u8::try_from(level)
            .map_err(|_| StoreError::Corrupt(format!("goal {} level {}", id, level)))?,
    })
}

type StatsRow = (i64, i64, Option<NaiveDate>);

fn read_stats_row(row: &Row<'_>) -> rusqlite::Result<StatsRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn stats_from_row((total_xp, streak, last_dungeon_date): StatsRow) -> Result<UserStats, StoreError> {
    Ok(UserStats {
        total_xp: u64::try_from(total_xp)
            .map_err(|_| StoreError::Corrupt(format!("total_xp {}", total_xp)))?,
        streak: u64::try_from(streak).map_err(|_| StoreError::Corrupt(format!("streak {}", streak)))?,
        last_dungeon_date,
    })
}

fn to_sql_int(value: u64, what: &str) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::Corrupt(format!("{} {} out of range", what, value)))
}

impl GoalRepository for SqliteStore {
    fn all_goals(&self) -> Result<Vec<Goal>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, title, xp, level FROM goals ORDER BY id")?;
        let rows = stmt
            .query_map([], read_goal_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(goal_from_row).collect()
    }

    fn goal(&self, id: GoalId) -> Result<Option<Goal>, StoreError> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT id, title, xp, level FROM goals WHERE id = ?1",
                params![id.0],
                read_goal_row,
            )
            .optional()?;
        row.map(goal_from_row).transpose()
    }

    fn update_goal_progress(
        &self,
        id: GoalId,
        xp: u64,
        level: u8,
    ) -> Result<Option<Goal>, StoreError> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "UPDATE goals SET xp = ?1, level = ?2 WHERE id = ?3 RETURNING id, title, xp, level",
                params![to_sql_int(xp, "xp")?, level as i64, id.0],
                read_goal_row,
            )
            .optional()?;
        row.map(goal_from_row).transpose()
    }
}

impl UserStatsRepository for SqliteStore {
    fn stats(&self) -> Result<UserStats, StoreError> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT total_xp, streak, last_dungeon_date FROM user_stats WHERE id = 1",
                [],
                read_stats_row,
            )
            .optional()?
            .ok_or(StoreError::MissingStats)?;
        stats_from_row(row)
    }

    fn update_stats(&self, stats: &UserStats) -> Result<UserStats, StoreError> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                r#"
                UPDATE user_stats SET
                    total_xp = ?1,
                    streak = ?2,
                    last_dungeon_date = ?3
                WHERE id = 1
                RETURNING total_xp, streak, last_dungeon_date
                "#,
                params![
                    to_sql_int(stats.total_xp, "total_xp")?,
                    to_sql_int(stats.streak, "streak")?,
                    stats.last_dungeon_date
                ],
                read_stats_row,
            )
            .optional()?
            .ok_or(StoreError::MissingStats)?;
        stats_from_row(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_path_is_absolute() {
        let path = SqliteStore::default_path();
        assert!(path.is_absolute());
        assert!(path.ends_with("ascend/ascend.db"));
    }

    #[test]
    fn test_fresh_store_has_zeroed_stats() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.stats().unwrap(), UserStats::default());
        assert!(store.all_goals().unwrap().is_empty());
    }

    #[test]
    fn test_goals_ordered_by_id() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert_goal("first").unwrap();
        store.insert_goal("second").unwrap();
        let titles: Vec<String> = store.all_goals().unwrap().into_iter().map(|g| g.title).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn test_update_goal_progress_returns_row() {
        let store = SqliteStore::open_in_memory().unwrap();
        let goal = store.insert_goal("meditate").unwrap();
        let updated = store.update_goal_progress(goal.id, 60, 1).unwrap().unwrap();
        assert_eq!(updated.xp, 60);
        assert_eq!(updated.level, 1);
        assert_eq!(store.goal(goal.id).unwrap(), Some(updated));
        assert!(store.update_goal_progress(GoalId(999), 10, 0).unwrap().is_none());
    }

    #[test]
    fn test_stats_date_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("ascend.db");
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        {
            let store = SqliteStore::open(&path).unwrap();
            store
                .update_stats(&UserStats {
                    total_xp: 30,
                    streak: 3,
                    last_dungeon_date: Some(date),
                })
                .unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.total_xp, 30);
        assert_eq!(stats.last_dungeon_date, Some(date));
    }

    #[test]
    fn test_seed_only_into_empty_table() {
        let store = SqliteStore::open_in_memory().unwrap();
        let titles = vec!["a".to_string(), "b".to_string()];
        assert_eq!(store.seed_goals(&titles).unwrap(), 2);
        assert_eq!(store.seed_goals(&titles).unwrap(), 0);
        assert_eq!(store.goal_count().unwrap(), 2);
    }
}
