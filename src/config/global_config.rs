//! Global configuration management
//!
//! Provides Git-like configuration stored in `<home>/config.toml`, where
//! `<home>` is `$MERKLEDROP_HOME` or `~/.merkledrop`.

use crate::core::amount::MAX_DECIMALS;
use crate::core::error::{MerkleDropError, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment variable overriding the configuration home
pub const HOME_ENV: &str = "MERKLEDROP_HOME";

const CONFIG_FILE: &str = "config.toml";
const DEFAULT_HOME_DIR: &str = ".merkledrop";
const DEFAULT_DATA_DIR: &str = "campaigns";
const DEFAULT_LOG_LEVEL: &str = "info";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Global configuration for merkledrop
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Campaign storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Token unit configuration
    #[serde(default)]
    pub units: UnitsConfig,
    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
    /// Custom configuration values
    #[serde(flatten)]
    pub custom: BTreeMap<String, ConfigValue>,
}

/// Where campaign documents live
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Campaign data directory; `<home>/campaigns` when unset
    pub data_dir: Option<PathBuf>,
}

/// How amounts in leaf lists are read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitsConfig {
    /// Token decimals; amounts are raw base units when unset
    pub decimals: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default log level when `RUST_LOG` is not set
    pub level: Option<String>,
}

/// Configuration value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    String(String),
    Number(i64),
    Boolean(bool),
}

/// Configuration key for setting values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigKey {
    StorageDataDir,
    UnitsDecimals,
    LogLevel,
    Custom(String),
}

impl ConfigKey {
    pub fn parse(key: &str) -> Self {
        match key {
            "storage.data_dir" => ConfigKey::StorageDataDir,
            "units.decimals" => ConfigKey::UnitsDecimals,
            "log.level" => ConfigKey::LogLevel,
            _ => ConfigKey::Custom(key.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ConfigKey::StorageDataDir => "storage.data_dir",
            ConfigKey::UnitsDecimals => "units.decimals",
            ConfigKey::LogLevel => "log.level",
            ConfigKey::Custom(key) => key,
        }
    }
}

impl GlobalConfig {
    /// Configuration home: `$MERKLEDROP_HOME`, else `~/.merkledrop`
    pub fn home_dir() -> Result<PathBuf> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(home));
        }
        let user_dirs = UserDirs::new().ok_or(MerkleDropError::HomeDirectoryNotFound)?;
        Ok(user_dirs.home_dir().join(DEFAULT_HOME_DIR))
    }

    /// Get the path to the global configuration file
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::home_dir()?.join(CONFIG_FILE))
    }

    /// Load global configuration from disk
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from an explicit path; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            MerkleDropError::configuration(format!(
                "Failed to parse config {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Save global configuration to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            MerkleDropError::configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Effective campaign data directory
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::home_dir()?.join(DEFAULT_DATA_DIR)),
        }
    }

    /// Effective log level
    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn decimals(&self) -> Option<u32> {
        self.units.decimals
    }

    /// Get a configuration value
    pub fn get(&self, key: &ConfigKey) -> Option<ConfigValue> {
        match key {
            ConfigKey::StorageDataDir => self
                .storage
                .data_dir
                .as_ref()
                .map(|p| ConfigValue::String(p.display().to_string())),
            ConfigKey::UnitsDecimals => self
                .units
                .decimals
                .map(|d| ConfigValue::Number(i64::from(d))),
            ConfigKey::LogLevel => self.log.level.clone().map(ConfigValue::String),
            ConfigKey::Custom(key) => self.custom.get(key).cloned(),
        }
    }

    /// Set a configuration value
    pub fn set(&mut self, key: ConfigKey, value: ConfigValue) -> Result<()> {
        match key {
            ConfigKey::StorageDataDir => match value {
                ConfigValue::String(dir) if !dir.trim().is_empty() => {
                    self.storage.data_dir = Some(PathBuf::from(dir));
                },
                _ => {
                    return Err(MerkleDropError::configuration(
                        "storage.data_dir must be a non-empty path",
                    ))
                },
            },
            ConfigKey::UnitsDecimals => match value {
                ConfigValue::Number(n) if (0..=i64::from(MAX_DECIMALS)).contains(&n) => {
                    self.units.decimals = Some(n as u32);
                },
                _ => {
                    return Err(MerkleDropError::configuration(format!(
                        "units.decimals must be a number between 0 and {}",
                        MAX_DECIMALS
                    )))
                },
            },
            ConfigKey::LogLevel => match value {
                ConfigValue::String(level) if LOG_LEVELS.contains(&level.as_str()) => {
                    self.log.level = Some(level);
                },
                _ => {
                    return Err(MerkleDropError::configuration(format!(
                        "log.level must be one of: {}",
                        LOG_LEVELS.join(", ")
                    )))
                },
            },
            ConfigKey::Custom(key_name) => {
                self.custom.insert(key_name, value);
            },
        }
        Ok(())
    }

    /// Unset a configuration value
    pub fn unset(&mut self, key: &ConfigKey) {
        match key {
            ConfigKey::StorageDataDir => self.storage.data_dir = None,
            ConfigKey::UnitsDecimals => self.units.decimals = None,
            ConfigKey::LogLevel => self.log.level = None,
            ConfigKey::Custom(key_name) => {
                self.custom.remove(key_name);
            },
        }
    }

    /// List all explicitly set configuration values, sorted by key
    pub fn list(&self) -> Vec<(String, String)> {
        let mut entries = Vec::new();

        for key in [ConfigKey::StorageDataDir, ConfigKey::UnitsDecimals, ConfigKey::LogLevel] {
            if let Some(value) = self.get(&key) {
                entries.push((key.as_str().to_string(), value.to_string()));
            }
        }
        for (key, value) in &self.custom {
            entries.push((key.clone(), value.to_string()));
        }

        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

impl ConfigValue {
    /// Interpret command-line text: booleans and integers first, else a string
    pub fn parse(text: &str) -> Self {
        if let Ok(b) = text.parse::<bool>() {
            ConfigValue::Boolean(b)
        } else if let Ok(n) = text.parse::<i64>() {
            ConfigValue::Number(n)
        } else {
            ConfigValue::String(text.to_string())
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            ConfigValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            ConfigValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValue::String(s) => write!(f, "{}", s),
            ConfigValue::Number(n) => write!(f, "{}", n),
            ConfigValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}
