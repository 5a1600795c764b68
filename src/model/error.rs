//! Error types for the lazytree application.
//!
//! A deliberately small taxonomy built with `thiserror`:
//!
//! - [`LoadError`] - the single core-level failure kind: a child fetch that
//!   failed, carrying a human-readable display message. Never propagated as
//!   a panic; the expansion layer converts it into per-node error state so
//!   one node's failure cannot halt sibling interactivity.
//! - [`AppError`] - top-level startup/shutdown failures (config, logging,
//!   terminal). These are fatal and propagate to `main`.

use thiserror::Error;

/// A failed child fetch, carrying a human-readable message.
///
/// This is the only error kind the tree core knows about. The root-items
/// load path reuses it, handled by the enclosing view rather than the tree
/// state. Display output is the message itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LoadError {
    /// Human-readable failure description shown inline on the error row.
    pub message: String,
}

impl LoadError {
    /// Build a load error from any displayable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Top-level application error encompassing fatal failure modes.
///
/// Child-fetch failures never reach this type; they become per-node state.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing subscriber could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal setup, rendering, or teardown failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_displays_its_message() {
        let err = LoadError::new("boom");
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn domain_errors_convert_to_app_error() {
        let err: AppError = crate::config::ConfigError::InvalidPath("x".to_string()).into();
        assert!(matches!(err, AppError::Config(_)));

        let err: AppError = std::io::Error::other("broken pipe").into();
        assert!(matches!(err, AppError::Terminal(_)));
    }

    #[test]
    fn load_error_converts_to_terminal_free_display() {
        let err = LoadError::new("Fake server error: failed to load folder children");
        assert_eq!(
            err.to_string(),
            "Fake server error: failed to load folder children"
        );
    }
}
