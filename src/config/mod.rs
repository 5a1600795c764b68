//! Configuration: file loading, precedence resolution, keybindings.
//!
//! Settings resolve through the chain
//! defaults → config file → environment (`LAZYTREE_*`) → CLI flags,
//! with later sources winning.

pub mod keybindings;
pub mod loader;


pub use keybindings::KeyBindings;
pub use loader::{default_config_path, load_config_with_precedence, ConfigError, ConfigFile};

use std::path::PathBuf;
use std::time::Duration;

/// Fully resolved configuration after the precedence chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Simulated fetch latency in milliseconds.
    pub delay_ms: u64,
    /// Probability (0..=1) that an uncached fetch fails.
    pub error_rate: f64,
    /// Seed for deterministic item generation; `None` derives one from the
    /// clock at startup.
    pub seed: Option<u32>,
    /// Probability that a generated item is a folder.
    pub folder_ratio: f64,
    /// Minimum items per listing.
    pub min_items: usize,
    /// Maximum items per listing.
    pub max_items: usize,
    /// Event-loop timer tick in milliseconds.
    pub tick_ms: u64,
    /// Log file path.
    pub log_file_path: PathBuf,
}

impl ResolvedConfig {
    /// Timer tick as a [`Duration`].
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1000,
            error_rate: 0.0,
            seed: None,
            folder_ratio: 0.7,
            min_items: 3,
            max_items: 8,
            tick_ms: 250,
            log_file_path: default_log_path(),
        }
    }
}

/// Default log location: `<data-local>/lazytree/lazytree.log`, falling back
/// to the system temp directory when no data dir is available.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("lazytree")
        .join("lazytree.log")
}

/// Merge an optional config file over the defaults.
pub fn merge_config(file: Option<ConfigFile>) -> ResolvedConfig {
    let mut resolved = ResolvedConfig::default();
    let Some(file) = file else {
        return resolved;
    };
    if let Some(v) = file.delay_ms {
        resolved.delay_ms = v;
    }
    if let Some(v) = file.error_rate {
        resolved.error_rate = v;
    }
    if let Some(v) = file.seed {
        resolved.seed = Some(v);
    }
    if let Some(v) = file.folder_ratio {
        resolved.folder_ratio = v;
    }
    if let Some(v) = file.min_items {
        resolved.min_items = v;
    }
    if let Some(v) = file.max_items {
        resolved.max_items = v;
    }
    if let Some(v) = file.tick_ms {
        resolved.tick_ms = v;
    }
    if let Some(v) = file.log_file_path {
        resolved.log_file_path = v;
    }
    resolved
}

/// Apply `LAZYTREE_*` environment variable overrides.
///
/// Unparsable values are ignored; the environment never aborts startup.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(v) = env_parse::<u64>("LAZYTREE_DELAY_MS") {
        config.delay_ms = v;
    }
    if let Some(v) = env_parse::<f64>("LAZYTREE_ERROR_RATE") {
        config.error_rate = v;
    }
    if let Some(v) = env_parse::<u32>("LAZYTREE_SEED") {
        config.seed = Some(v);
    }
    if let Some(v) = env_parse::<f64>("LAZYTREE_FOLDER_RATIO") {
        config.folder_ratio = v;
    }
    if let Some(v) = env_parse::<usize>("LAZYTREE_MIN_ITEMS") {
        config.min_items = v;
    }
    if let Some(v) = env_parse::<usize>("LAZYTREE_MAX_ITEMS") {
        config.max_items = v;
    }
    if let Some(v) = env_parse::<u64>("LAZYTREE_TICK_MS") {
        config.tick_ms = v;
    }
    if let Ok(v) = std::env::var("LAZYTREE_LOG_FILE") {
        if !v.is_empty() {
            config.log_file_path = PathBuf::from(v);
        }
    }
    config
}

/// CLI flag values that override everything else when present.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CliOverrides {
    /// `--delay-ms`.
    pub delay_ms: Option<u64>,
    /// `--error-rate`.
    pub error_rate: Option<f64>,
    /// `--seed`.
    pub seed: Option<u32>,
    /// `--folder-ratio`.
    pub folder_ratio: Option<f64>,
    /// `--min-items`.
    pub min_items: Option<usize>,
    /// `--max-items`.
    pub max_items: Option<usize>,
}

/// Apply CLI overrides, then normalize ranges: `error_rate` and
/// `folder_ratio` clamp to `0..=1`, `max_items` is raised to `min_items`
/// when the pair is inverted.
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(v) = cli.delay_ms {
        config.delay_ms = v;
    }
    if let Some(v) = cli.error_rate {
        config.error_rate = v;
    }
    if let Some(v) = cli.seed {
        config.seed = Some(v);
    }
    if let Some(v) = cli.folder_ratio {
        config.folder_ratio = v;
    }
    if let Some(v) = cli.min_items {
        config.min_items = v;
    }
    if let Some(v) = cli.max_items {
        config.max_items = v;
    }

    config.error_rate = config.error_rate.clamp(0.0, 1.0);
    config.folder_ratio = config.folder_ratio.clamp(0.0, 1.0);
    config.min_items = config.min_items.max(1);
    config.max_items = config.max_items.max(config.min_items);
    config
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
