//! Configuration management for LazyLogbook.
//!
//! This module handles loading, saving, and validating the user
//! configuration: application settings and the signed-in operator.

mod operator;
mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use operator::Operator;
pub use settings::{default_data_file, Settings, DEFAULT_TICK_RATE_MS};

/// Environment variable that overrides the configuration file location.
pub const CONFIG_PATH_ENV: &str = "LAZYLOGBOOK_CONFIG";

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform has no configuration directory.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    #[error("Failed to create config directory: {0}")]
    CreateDirError(#[source] std::io::Error),

    #[error("Failed to read config file: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("Failed to write config file: {0}")]
    WriteError(#[source] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// The configuration is well-formed but not usable.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The complete user configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,

    /// The signed-in operator. Required to start the console.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
}

impl Config {
    /// Path of the configuration file.
    ///
    /// `LAZYLOGBOOK_CONFIG` takes precedence over the platform config
    /// directory (`~/.config/lazylogbook/config.toml` on Linux).
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("lazylogbook").join("config.toml"))
    }

    /// Load the configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load the configuration from a file.
    ///
    /// A missing file yields the default configuration.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content)?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Save the configuration to the default location.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save the configuration to a file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(ConfigError::WriteError)?;
        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.settings.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }
        match &self.operator {
            Some(operator) => operator.validate(),
            None => Err(ConfigError::ValidationError(
                "no operator configured".to_string(),
            )),
        }
    }

    /// A starter configuration written by `lazylogbook init`.
    pub fn starter() -> Self {
        Self {
            settings: Settings {
                data_file: default_data_file(),
                ..Settings::default()
            },
            operator: Some(Operator::new(
                "admin",
                "Administrator",
                crate::models::Role::SuperAdmin,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::store::Environment;
    use crate::ui::PageSize;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::starter();
        config.settings.environment = Environment::Production;
        config.settings.page_size = PageSize::Hundred;

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_parse_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[settings]
environment = "production"
vim_mode = false

[operator]
id = "op-7"
name = "Sari"
role = "admin"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.settings.environment, Environment::Production);
        assert!(!config.settings.vim_mode);
        let operator = config.operator.unwrap();
        assert_eq!(operator.role, Role::Admin);
        assert_eq!(operator.id, "op-7");
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "settings = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_validate_requires_operator() {
        let config = Config::default();
        assert!(config
            .validate()
            .unwrap_err()
            .to_string()
            .contains("no operator"));
        assert!(Config::starter().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_tick_rate() {
        let mut config = Config::starter();
        config.settings.tick_rate_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_config_path_env_override() {
        std::env::set_var(CONFIG_PATH_ENV, "/tmp/custom/lazylogbook.toml");
        let path = Config::config_path().unwrap();
        std::env::remove_var(CONFIG_PATH_ENV);
        assert_eq!(path, PathBuf::from("/tmp/custom/lazylogbook.toml"));
    }

    #[test]
    #[serial]
    fn test_config_path_default() {
        std::env::remove_var(CONFIG_PATH_ENV);
        if let Ok(path) = Config::config_path() {
            assert!(path.ends_with("lazylogbook/config.toml"));
        }
    }
}
