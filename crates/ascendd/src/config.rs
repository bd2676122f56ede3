//! Configuration management for ascendd.
//!
//! Loads settings from $ASCEND_CONFIG, then /etc/ascend/config.toml, or uses defaults.

use anyhow::{Context, Result};
use ascend_common::{SqliteStore, DEFAULT_BIND};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/ascend/config.toml";

/// Environment variable overriding the config path
pub const CONFIG_ENV: &str = "ASCEND_CONFIG";

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind, localhost only by default
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Goal database location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite file; system or per-user default when unset
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolved_db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(SqliteStore::default_path)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Goal titles inserted when the goal table is empty
    #[serde(default)]
    pub seed_goals: Vec<String>,
}

impl Config {
    /// $ASCEND_CONFIG if set, else the system path
    pub fn path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_PATH))
    }

    /// Load config from specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.bind, DEFAULT_BIND);
        assert_eq!(config.logging.level, "info");
        assert!(config.seed_goals.is_empty());
        assert!(config.storage.db_path.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            seed_goals = ["Run 5k", "Read"]

            [storage]
            db_path = "/tmp/ascend-test.db"
            "#,
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.seed_goals, vec!["Run 5k", "Read"]);
        assert_eq!(config.storage.resolved_db_path(), PathBuf::from("/tmp/ascend-test.db"));
        assert_eq!(config.server.bind, DEFAULT_BIND);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server\nbind = 1").unwrap();
        assert!(Config::load_from_path(&path).is_err());
    }
}
