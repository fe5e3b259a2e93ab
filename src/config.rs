//! Configuration management for walletmeta

use crate::error::{MetadataError, Result};
use crate::settings::JsonFileSettings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "walletmeta.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsConfig {
    /// Directory of the settings files; the user config dir when unset
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Config {
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn settings_store(&self) -> JsonFileSettings {
        let dir = self
            .settings
            .dir
            .clone()
            .unwrap_or_else(JsonFileSettings::default_dir);
        JsonFileSettings::new(dir)
    }

    fn validate(&self) -> Result<()> {
        if self.api.timeout_secs == 0 {
            return Err(MetadataError::ConfigError(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(MetadataError::ConfigError(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    10
}

fn default_level() -> String {
    "info".to_string()
}

/// Parse and validate a config document.
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config = if config_str.trim().is_empty() {
        Config::default()
    } else {
        toml::from_str(config_str)?
    };
    config.validate()?;
    Ok(config)
}

/// Load the config file at `path`. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config> {
    let config_str = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };
    parse_config(&config_str)
}
