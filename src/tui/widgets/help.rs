//! Help overlay

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::theme::THEME;

const KEYS: &[(&str, &str)] = &[
    ("s", "start agent with the lot input"),
    ("x", "stop agent"),
    ("+ / → ", "lot +0.01"),
    ("- / ← ", "lot -0.01"),
    ("e", "type a lot (0.01 - 1.00)"),
    ("↑ k / ↓ j", "scroll log"),
    ("g", "follow newest log lines"),
    ("?", "toggle this help"),
    ("q / Esc", "close console"),
];

/// Render the help overlay centered in `area`
pub fn render_help(f: &mut Frame, area: Rect) {
    let width = 52.min(area.width);
    let height = (KEYS.len() as u16 + 2).min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let lines: Vec<Line> = KEYS
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!(" {key:<10}"), THEME.highlight_style()),
                Span::styled(*desc, THEME.text_style()),
            ])
        })
        .collect();

    let block = Block::default()
        .title(" KEYS ")
        .title_style(THEME.title_style())
        .borders(Borders::ALL)
        .border_style(THEME.border_style());

    f.render_widget(Clear, popup);
    f.render_widget(Paragraph::new(lines).block(block), popup);
}
