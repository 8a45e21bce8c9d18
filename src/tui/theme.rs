//! Theme and color definitions for the console
//!
//! Cyan borders, green for a running agent, red for stopped or failing.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the console
#[derive(Debug, Clone)]
pub struct Theme {
    /// Border color (cyan)
    pub border: Color,
    /// Title color
    pub title: Color,
    /// Running agent / connected account (green)
    pub running: Color,
    /// Stopped agent (red)
    pub stopped: Color,
    /// Error lines and failed polls (red)
    pub error: Color,
    /// Not-connected / pending states (yellow)
    pub warning: Color,
    /// Highlight/accent color (yellow)
    pub highlight: Color,
    /// Inactive/dim color
    pub inactive: Color,
    /// Normal text color
    pub text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border: Color::Cyan,
            title: Color::Cyan,
            running: Color::Green,
            stopped: Color::Red,
            error: Color::LightRed,
            warning: Color::Yellow,
            highlight: Color::Yellow,
            inactive: Color::DarkGray,
            text: Color::White,
        }
    }
}

impl Theme {
    /// Get style for borders
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Get style for titles
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    /// Get style for the lifecycle state
    pub fn state_style(&self, running: bool) -> Style {
        let color = if running { self.running } else { self.stopped };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn ok_style(&self) -> Style {
        Style::default().fg(self.running)
    }

    /// Get style for highlighted text
    pub fn highlight_style(&self) -> Style {
        Style::default().fg(self.highlight)
    }

    /// Get style for inactive/dim text
    pub fn inactive_style(&self) -> Style {
        Style::default().fg(self.inactive)
    }

    /// Get style for normal text
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }
}

/// Global theme instance
pub static THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);
