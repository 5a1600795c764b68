//! Configuration file loading.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read an explicitly requested config file.
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional; unset fields fall back to hardcoded defaults.
/// Corresponds to `~/.config/lazytree/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Simulated fetch latency in milliseconds.
    #[serde(default)]
    pub delay_ms: Option<u64>,

    /// Probability (0..=1) that an uncached fetch fails.
    #[serde(default)]
    pub error_rate: Option<f64>,

    /// Seed for deterministic item generation.
    #[serde(default)]
    pub seed: Option<u32>,

    /// Probability that a generated item is a folder.
    #[serde(default)]
    pub folder_ratio: Option<f64>,

    /// Minimum items per listing.
    #[serde(default)]
    pub min_items: Option<usize>,

    /// Maximum items per listing.
    #[serde(default)]
    pub max_items: Option<usize>,

    /// Event-loop timer tick in milliseconds.
    #[serde(default)]
    pub tick_ms: Option<u64>,

    /// Log file path.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Load a config file, applying lookup rules.
///
/// With an explicit path, the file must exist and parse; both failures are
/// errors. Without one, the default location is tried and a missing file is
/// simply `Ok(None)`.
pub fn load_config_with_precedence(
    explicit_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    match explicit_path {
        Some(path) => load_file(&path).map(Some),
        None => {
            let Some(path) = default_config_path() else {
                return Ok(None);
            };
            if !path.exists() {
                return Ok(None);
            }
            load_file(&path).map(Some)
        }
    }
}

/// Default config location: `~/.config/lazytree/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lazytree").join("config.toml"))
}

fn load_file(path: &PathBuf) -> Result<ConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })
}
