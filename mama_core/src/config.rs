//! Configuration file support for mama.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/mama/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

/// Logging configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_data_file() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        dirs::home_dir()
            .map(|home| home.join(".local/share"))
            .unwrap_or_else(|| PathBuf::from("."))
    });
    base.join("mama").join("mama.txt")
}

fn default_log_level() -> String {
    "warn".into()
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            dirs::home_dir()
                .map(|home| home.join(".config"))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        base.join("mama").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(Error::Config(format!(
                "unknown log level '{}', expected one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        if self.data.data_file.as_os_str().is_empty() {
            return Err(Error::Config("data_file must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "warn");
        assert!(config.data.data_file.ends_with("mama/mama.txt"));
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.data.data_file = temp_dir.path().join("journal.txt");
        config.logging.level = "debug".into();
        config.save_to(&path).unwrap();

        let parsed = Config::load_from(&path).unwrap();
        assert_eq!(parsed.data.data_file, config.data.data_file);
        assert_eq!(parsed.logging.level, "debug");
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[data]
data_file = "/tmp/mama-test.txt"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.data.data_file, PathBuf::from("/tmp/mama-test.txt"));
        assert_eq!(config.logging.level, "warn"); // default
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"loud\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
