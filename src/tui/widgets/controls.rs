//! Lot input and lifecycle status panel

use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::ConsoleApp;
use crate::tui::theme::THEME;

/// Render the controls panel
pub fn render_controls(f: &mut Frame, area: Rect, app: &ConsoleApp) {
    let block = Block::default()
        .title(" AGENT ")
        .title_style(THEME.title_style())
        .borders(Borders::ALL)
        .border_style(THEME.border_style());

    let lot_line = match &app.lot_entry {
        Some(entry) => Line::from(vec![
            Span::raw(" Position size: "),
            Span::styled(
                format!("[{entry}_]"),
                THEME.highlight_style().add_modifier(Modifier::REVERSED),
            ),
            Span::raw(" lot"),
            Span::styled("   Enter apply · Esc cancel", THEME.inactive_style()),
        ]),
        None => Line::from(vec![
            Span::raw(" Position size: "),
            Span::styled(
                format!("[{}]", app.lot_input),
                THEME.highlight_style().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" lot"),
            Span::styled(
                "   +/- step 0.01 · e type · s start · x stop",
                THEME.inactive_style(),
            ),
        ]),
    };

    let status = &app.status;
    let mut status_spans = vec![
        Span::raw(" "),
        Span::styled(
            if status.running { "● " } else { "■ " },
            THEME.state_style(status.running),
        ),
        Span::styled(status.to_string(), THEME.state_style(status.running)),
    ];
    if status.last_error.is_some() {
        status_spans.push(Span::styled("  (!)", THEME.error_style()));
    }

    let paragraph = Paragraph::new(vec![lot_line, Line::from(status_spans)]).block(block);
    f.render_widget(paragraph, area);
}
