//! Configuration management for roster.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::notice::DEFAULT_NOTICE_DURATION_MS;
use crate::store::DEFAULT_SLOT_KEY;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "roster";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "storage.db";

/// Longest notice duration accepted (one hour).
const MAX_NOTICE_DURATION_MS: u64 = 60 * 60 * 1000;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ROSTER_`, `__` between sections)
/// 2. TOML config file at `~/.config/roster/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Screen configuration.
    pub ui: UiConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/roster/storage.db`
    pub database_path: Option<PathBuf>,
    /// Name of the slot holding the student array.
    pub slot_key: String,
}

/// Screen-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long a transient notice stays visible, in milliseconds.
    pub notice_duration_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            slot_key: DEFAULT_SLOT_KEY.to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notice_duration_ms: DEFAULT_NOTICE_DURATION_MS,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        Self::figment(Toml::file(&config_file))
    }

    /// Load configuration from a TOML string layered over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or fails validation.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string(toml))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    fn figment(file: figment::providers::Data<Toml>) -> Result<Self> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(file)
            .merge(Env::prefixed("ROSTER_").split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.slot_key.is_empty() {
            return Err(Error::ConfigValidation {
                message: "slot_key must not be empty".to_string(),
            });
        }

        if self.ui.notice_duration_ms == 0 {
            return Err(Error::ConfigValidation {
                message: "notice_duration_ms must be greater than 0".to_string(),
            });
        }

        if self.ui.notice_duration_ms > MAX_NOTICE_DURATION_MS {
            return Err(Error::ConfigValidation {
                message: format!(
                    "notice_duration_ms ({}) cannot exceed {MAX_NOTICE_DURATION_MS}",
                    self.ui.notice_duration_ms
                ),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the notice duration as a Duration.
    #[must_use]
    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.ui.notice_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.database_path.is_none());
        assert_eq!(config.storage.slot_key, "studentData");
        assert_eq!(config.ui.notice_duration_ms, 3000);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_slot_key() {
        let mut config = Config::default();
        config.storage.slot_key = String::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("slot_key"));
    }

    #[test]
    fn test_validate_zero_notice_duration() {
        let mut config = Config::default();
        config.ui.notice_duration_ms = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("notice_duration_ms"));
    }

    #[test]
    fn test_validate_huge_notice_duration() {
        let mut config = Config::default();
        config.ui.notice_duration_ms = MAX_NOTICE_DURATION_MS + 1;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_database_path_default() {
        let path = Config::default().database_path();
        assert!(path.to_string_lossy().contains("storage.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/db.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/db.sqlite")
        );
    }

    #[test]
    fn test_notice_duration() {
        assert_eq!(
            Config::default().notice_duration(),
            Duration::from_millis(3000)
        );
    }

    #[test]
    fn test_default_paths() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("roster"));
        assert!(path.to_string_lossy().contains("config.toml"));
        assert!(Config::default_data_dir()
            .to_string_lossy()
            .contains("roster"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_from_toml_str_overrides() {
        let config = Config::from_toml_str(
            r#"
            [storage]
            slot_key = "students"

            [ui]
            notice_duration_ms = 1500
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.slot_key, "students");
        assert_eq!(config.notice_duration(), Duration::from_millis(1500));
        assert!(config.storage.database_path.is_none());
    }

    #[test]
    fn test_from_toml_str_rejects_invalid_values() {
        let result = Config::from_toml_str("[ui]\nnotice_duration_ms = 0\n");
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("slot_key"));
        assert!(json.contains("notice_duration_ms"));
    }
}
