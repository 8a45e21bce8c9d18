//! Account snapshot line

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::AccountSnapshot;
use crate::tui::app::ConsoleApp;
use crate::tui::theme::THEME;

/// Render the account panel
pub fn render_account(f: &mut Frame, area: Rect, app: &ConsoleApp) {
    let block = Block::default()
        .title(" ACCOUNT ")
        .title_style(THEME.title_style())
        .borders(Borders::ALL)
        .border_style(THEME.border_style());

    let style = match &app.account {
        Some(AccountSnapshot::Metrics(_)) => THEME.ok_style(),
        Some(AccountSnapshot::NotConnected) => THEME.warning_style(),
        Some(AccountSnapshot::Error(_)) => THEME.error_style(),
        None => THEME.inactive_style(),
    };

    let updated = app
        .account_updated
        .map(|t| format!("  @ {}", t.format("%H:%M:%S")))
        .unwrap_or_default();

    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(app.account_line(), style),
        Span::styled(updated, THEME.inactive_style()),
    ]);

    f.render_widget(Paragraph::new(line).block(block), area);
}
