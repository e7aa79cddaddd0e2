//! Global configuration management for merkledrop
//!
//! This module provides Git-like configuration functionality,
//! storing user settings in `~/.merkledrop/config.toml`

pub mod global_config;

// Re-export commonly used items
pub use global_config::{ConfigKey, ConfigValue, GlobalConfig, HOME_ENV};
