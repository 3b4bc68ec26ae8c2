//! Top-level `Config` and its YAML persistence.
//!
//! Covers:
//! - `load` / `load_from` / `save_to` (YAML file I/O)
//! - XDG-compliant path helpers (`config_dir`, `config_path`)
//! - `validate` for semantic checks that serde cannot express

use crate::error::ConfigError;
use crate::search_config::SearchConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration for the search widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Search options, history bounds, and landmark timing
    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    /// Directory holding page-find configuration files.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("page-find")
    }

    /// Path of the main configuration file.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Load configuration from the default path, or return defaults when no
    /// file exists yet.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if !config_path.exists() {
            log::info!("No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    /// Load and validate configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml_ng::from_str(&contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        log::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Write configuration to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::Serialize)?;
        fs::write(path, yaml)?;
        log::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject values that deserialize fine but cannot work at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.history_max_entries == 0 {
            return Err(ConfigError::Validation(
                "search.history_max_entries must be at least 1".to_string(),
            ));
        }
        if self.search.history_key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "search.history_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
