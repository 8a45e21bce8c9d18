//! Title bar

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::ConsoleApp;
use crate::tui::theme::THEME;

/// Render the title bar
pub fn render_header(f: &mut Frame, area: Rect, app: &ConsoleApp) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(THEME.border_style());

    let line = Line::from(vec![
        Span::styled(" LOUP Ω ", THEME.title_style()),
        Span::styled("live agent console", THEME.text_style()),
        Span::raw("   "),
        Span::styled(
            format!("mode: {}", app.status.mode.as_str().to_uppercase()),
            THEME.highlight_style(),
        ),
        Span::raw("   "),
        Span::styled(
            "no fixed TP · initial SL + break-even + trailing",
            THEME.inactive_style(),
        ),
    ]);

    f.render_widget(Paragraph::new(line).block(block), area);
}
