//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the tide-config.toml file.
//! It provides a centralized way to configure the default season, output precision,
//! the interactive prompt and logging.
//!
//! Every field has a default, so a partial file only overrides what it names.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "tide-config.toml";

/// Application configuration loaded from tide-config.toml
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Seasonal clock settings
    pub session: SessionConfig,
    /// Output formatting
    pub display: DisplayConfig,
    /// Interactive prompt settings
    pub repl: ReplConfig,
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    pub log_level: String,
}

/// Seasonal clock configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Start sessions in summer time
    pub summer_time: bool,
    /// Minutes the summer clock runs ahead of the tide-table clock
    pub summer_offset_minutes: i32,
}

/// Display and formatting configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Decimals printed for heights
    pub precision: usize,
    /// Height of the ASCII chart in rows
    pub chart_rows: usize,
    /// Width of the ASCII chart plot area in columns
    pub chart_columns: usize,
}

/// Interactive prompt configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Prompt shown before each query
    pub prompt: String,
    /// History file; empty disables history
    pub history_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            session: SessionConfig::default(),
            display: DisplayConfig::default(),
            repl: ReplConfig::default(),
            log_level: "warn".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            summer_time: false,
            summer_offset_minutes: crate::session::DEFAULT_SUMMER_OFFSET_MINUTES,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            precision: 2,
            chart_rows: 16,
            chart_columns: 61, // one column every 6 minutes of a 6 h half-cycle
        }
    }
}

impl Default for ReplConfig {
    fn default() -> Self {
        ReplConfig {
            prompt: "> ".to_string(),
            history_file: ".tide_history".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), "loaded configuration");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                info!(path = %path.display(), "no config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Save current configuration to the given path
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        info!(path = %path.as_ref().display(), "configuration saved");
        Ok(())
    }
}
