//! Log panel
//!
//! Shows the ordered agent/console output, newest at the bottom.

use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use crate::tui::app::ConsoleApp;
use crate::tui::theme::THEME;

/// Render the log panel
pub fn render_logs(f: &mut Frame, area: Rect, app: &ConsoleApp) {
    let title = if app.log_scroll_offset > 0 {
        format!(" LOG (scrolled back {}) ", app.log_scroll_offset)
    } else {
        " LOG ".to_string()
    };

    let block = Block::default()
        .title(title)
        .title_style(THEME.title_style())
        .borders(Borders::ALL)
        .border_style(THEME.border_style());

    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.logs.is_empty() {
        let placeholder = Paragraph::new("Agent, terminal and console output appears here")
            .style(THEME.inactive_style());
        f.render_widget(placeholder, inner);
        return;
    }

    let visible_rows = inner.height as usize;
    let lines: Vec<Line> = app
        .visible_logs(visible_rows)
        .map(|event| {
            let style = if event.is_error() {
                THEME.error_style()
            } else {
                THEME.text_style()
            };
            Line::styled(event.text().to_string(), style)
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);

    // Render scrollbar if needed
    if app.logs.len() > visible_rows {
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None);

        let position = app.logs.len().saturating_sub(1 + app.log_scroll_offset);
        let mut scrollbar_state = ScrollbarState::new(app.logs.len()).position(position);

        f.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}
