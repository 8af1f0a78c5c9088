use serde::{Deserialize, Serialize};

use super::cleanup::CleanupConfig;
use super::database::DatabaseConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;

/// Main configuration structure for the signage maintenance tool
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Database connection settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Retention cleanup behaviour
    #[serde(default)]
    pub cleanup: CleanupConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. signage.toml in current directory
    /// 3. /etc/signage/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("signage.toml").exists() {
            Self::from_file("signage.toml")?
        } else if std::path::Path::new("/etc/signage/config.toml").exists() {
            Self::from_file("/etc/signage/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(db) = overrides.database_path {
            self.database.path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Database path cannot be empty".to_string(),
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "database.max_connections must be at least 1".to_string(),
            ));
        }

        if self.cleanup.max_threshold_attempts == 0 {
            return Err(ConfigError::Validation(
                "cleanup.max_threshold_attempts must be at least 1".to_string(),
            ));
        }

        if self.cleanup.tz().is_none() {
            return Err(ConfigError::Validation(format!(
                "Unknown timezone '{}'",
                self.cleanup.timezone
            )));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub database_path: Option<String>,
    pub log_level: Option<String>,
}
