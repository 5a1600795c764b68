//! lazytree - Entry Point

use clap::Parser;
use lazytree::config::{CliOverrides, ResolvedConfig};
use lazytree::source::{FakeFsServer, ServerOptions};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// TUI explorer for lazily loaded hierarchical trees.
#[derive(Parser, Debug)]
#[command(name = "lazytree")]
#[command(version)]
#[command(about = "Explore a lazily loaded fake file hierarchy in the terminal")]
pub struct Args {
    /// Simulated fetch latency in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Probability that an uncached fetch fails (0.0 to 1.0)
    #[arg(long, value_parser = parse_rate)]
    pub error_rate: Option<f64>,

    /// Seed for deterministic item generation (random when omitted)
    #[arg(long)]
    pub seed: Option<u32>,

    /// Probability that a generated item is a folder (0.0 to 1.0)
    #[arg(long, value_parser = parse_rate)]
    pub folder_ratio: Option<f64>,

    /// Minimum items per folder listing
    #[arg(long)]
    pub min_items: Option<usize>,

    /// Maximum items per folder listing
    #[arg(long)]
    pub max_items: Option<usize>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_rate(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|_| format!("not a number: {raw}"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("must be between 0.0 and 1.0, got {value}"))
    }
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            delay_ms: self.delay_ms,
            error_rate: self.error_rate,
            seed: self.seed,
            folder_ratio: self.folder_ratio,
            min_items: self.min_items,
            max_items: self.max_items,
        }
    }
}

/// Seed fallback when neither CLI, env, nor config provide one.
fn seed_from_clock() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(0x1337)
}

fn resolve_config(args: &Args) -> Result<ResolvedConfig, lazytree::config::ConfigError> {
    // Precedence chain: defaults -> config file -> env vars -> CLI args.
    let config_file = lazytree::config::load_config_with_precedence(args.config.clone())?;
    let merged = lazytree::config::merge_config(config_file);
    let with_env = lazytree::config::apply_env_overrides(merged);
    Ok(lazytree::config::apply_cli_overrides(with_env, args.overrides()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    lazytree::logging::init(&config.log_file_path)?;
    info!(config = ?config, "configuration loaded and resolved");

    let seed = config.seed.unwrap_or_else(seed_from_clock);
    let server = FakeFsServer::new(ServerOptions {
        delay: Duration::from_millis(config.delay_ms),
        error_rate: config.error_rate,
        min_items: config.min_items,
        max_items: config.max_items,
        seed,
        folder_ratio: config.folder_ratio,
    });

    let header = format!(
        " lazytree  seed {seed}  delay {}ms  errors {:.0}%",
        config.delay_ms,
        config.error_rate * 100.0
    );

    lazytree::view::run_with_source(Arc::new(server), &config, header)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn help_does_not_error() {
        let result = Args::try_parse_from(["lazytree", "--help"]);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn version_does_not_error() {
        let result = Args::try_parse_from(["lazytree", "--version"]);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::DisplayVersion
        );
    }

    #[test]
    fn no_args_means_no_overrides() {
        let args = Args::parse_from(["lazytree"]);
        assert_eq!(args.overrides(), CliOverrides::default());
    }

    #[test]
    fn all_flags_parse() {
        let args = Args::parse_from([
            "lazytree",
            "--delay-ms",
            "250",
            "--error-rate",
            "0.3",
            "--seed",
            "42",
            "--folder-ratio",
            "0.5",
            "--min-items",
            "2",
            "--max-items",
            "6",
        ]);
        let overrides = args.overrides();
        assert_eq!(overrides.delay_ms, Some(250));
        assert_eq!(overrides.error_rate, Some(0.3));
        assert_eq!(overrides.seed, Some(42));
        assert_eq!(overrides.folder_ratio, Some(0.5));
        assert_eq!(overrides.min_items, Some(2));
        assert_eq!(overrides.max_items, Some(6));
    }

    #[test]
    fn error_rate_out_of_range_is_rejected() {
        let result = Args::try_parse_from(["lazytree", "--error-rate", "1.5"]);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ValueValidation
        );
    }

    #[test]
    fn folder_ratio_negative_is_rejected() {
        let result = Args::try_parse_from(["lazytree", "--folder-ratio", "-0.1"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_path_flag() {
        let args = Args::parse_from(["lazytree", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn cli_overrides_flow_through_precedence_chain() {
        let args = Args::parse_from(["lazytree", "--delay-ms", "1"]);
        let resolved = lazytree::config::apply_cli_overrides(
            ResolvedConfig::default(),
            args.overrides(),
        );
        assert_eq!(resolved.delay_ms, 1);
    }
}
