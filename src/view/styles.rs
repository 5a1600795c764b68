//! Row styling configuration.

use ratatui::style::{Color, Modifier, Style};

/// Configuration for color output.
///
/// Colors are disabled when the `NO_COLOR` environment variable is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Detect color support from the environment.
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var("NO_COLOR").is_err(),
        }
    }

    /// Force colors on or off (tests, snapshots).
    pub fn forced(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

/// Styles for the explorer's row variants and chrome.
#[derive(Debug, Clone)]
pub struct ExplorerStyles {
    /// Folder names.
    pub folder: Style,
    /// File names.
    pub file: Style,
    /// Secondary text (file sizes).
    pub secondary: Style,
    /// The row under the cursor.
    pub cursor: Style,
    /// Inline error rows.
    pub error: Style,
    /// Skeleton placeholder rows.
    pub placeholder: Style,
    /// Header line.
    pub header: Style,
    /// Footer key hints.
    pub footer: Style,
}

impl ExplorerStyles {
    /// Default palette, honoring the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                folder: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                file: Style::default(),
                secondary: Style::default().fg(Color::DarkGray),
                cursor: Style::default().add_modifier(Modifier::REVERSED),
                error: Style::default().fg(Color::Red),
                placeholder: Style::default().fg(Color::DarkGray),
                header: Style::default().add_modifier(Modifier::BOLD),
                footer: Style::default().fg(Color::DarkGray),
            }
        } else {
            Self {
                folder: Style::default(),
                file: Style::default(),
                secondary: Style::default(),
                cursor: Style::default().add_modifier(Modifier::REVERSED),
                error: Style::default(),
                placeholder: Style::default(),
                header: Style::default(),
                footer: Style::default(),
            }
        }
    }
}

impl Default for ExplorerStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env())
    }
}
