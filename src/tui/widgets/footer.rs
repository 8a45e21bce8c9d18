//! Footer status bar widget
//!
//! Key hints and log counters.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::ConsoleApp;
use crate::tui::theme::THEME;

/// Render the footer status bar
pub fn render_footer(f: &mut Frame, area: Rect, app: &ConsoleApp) {
    let mut spans = vec![
        Span::raw("  Lines: "),
        Span::styled(app.total_log_lines.to_string(), THEME.highlight_style()),
        Span::raw("  Errors: "),
        Span::styled(
            app.error_log_lines.to_string(),
            if app.error_log_lines > 0 {
                THEME.error_style()
            } else {
                THEME.highlight_style()
            },
        ),
    ];

    if app.dropped_log_lines > 0 {
        spans.push(Span::raw("  Trimmed: "));
        spans.push(Span::styled(
            app.dropped_log_lines.to_string(),
            THEME.inactive_style(),
        ));
    }

    spans.push(Span::styled(
        "   s start · x stop · ↑/↓ scroll · g tail · ? help · q quit",
        THEME.inactive_style(),
    ));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
