//! Main UI rendering logic
//!
//! Orchestrates the layout and renders all widgets.

use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

use crate::tui::app::ConsoleApp;
use crate::tui::widgets;

/// Render the entire UI
pub fn render(f: &mut Frame, app: &ConsoleApp) {
    // Main vertical layout
    let chunks = Layout::vertical([
        Constraint::Length(2), // Header
        Constraint::Length(4), // Lot input + lifecycle status
        Constraint::Length(3), // Account
        Constraint::Min(5),    // Log panel (fills remaining)
        Constraint::Length(1), // Footer status bar
    ])
    .split(f.area());

    widgets::render_header(f, chunks[0], app);
    widgets::render_controls(f, chunks[1], app);
    widgets::render_account(f, chunks[2], app);
    widgets::render_logs(f, chunks[3], app);
    widgets::render_footer(f, chunks[4], app);

    if app.show_help {
        widgets::render_help(f, f.area());
    }
}
