//! Console application state
//!
//! Holds everything the dashboard draws. Only the control loop mutates it.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::bridge::LogEvent;
use crate::domain::{AccountSnapshot, AgentStatusLine, Lot};
use crate::error::Result;

/// Longest text accepted in the lot entry field
const MAX_ENTRY_LEN: usize = 8;

/// Console application state
pub struct ConsoleApp {
    /// Lot the next start will use
    pub lot_input: Lot,
    /// Typed lot entry in progress
    pub lot_entry: Option<String>,
    /// Latest lifecycle summary
    pub status: AgentStatusLine,
    /// Latest account poll, `None` until the first one lands
    pub account: Option<AccountSnapshot>,
    /// When the account line was last replaced
    pub account_updated: Option<DateTime<Utc>>,
    /// Log lines in arrival order (oldest first)
    pub logs: VecDeque<LogEvent>,
    /// Retention limit of the log panel
    pub max_log_lines: usize,
    /// Lines received since the console opened
    pub total_log_lines: u64,
    /// Error-stream lines received since the console opened
    pub error_log_lines: u64,
    /// Lines evicted from the panel by the retention limit
    pub dropped_log_lines: u64,
    /// Lines scrolled back from the newest one (0 = follow)
    pub log_scroll_offset: usize,
    /// Is the console running
    pub running: bool,
    /// Show help overlay
    pub show_help: bool,
}

impl ConsoleApp {
    pub fn new(lot_input: Lot, status: AgentStatusLine, max_log_lines: usize) -> Self {
        Self {
            lot_input,
            lot_entry: None,
            status,
            account: None,
            account_updated: None,
            logs: VecDeque::new(),
            max_log_lines: max_log_lines.max(1),
            total_log_lines: 0,
            error_log_lines: 0,
            dropped_log_lines: 0,
            log_scroll_offset: 0,
            running: true,
            show_help: false,
        }
    }

    /// Check if app should continue running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Signal the app to quit
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, status: AgentStatusLine) {
        self.status = status;
    }

    /// Replace the account line wholesale
    pub fn set_account(&mut self, snapshot: AccountSnapshot) {
        self.account = Some(snapshot);
        self.account_updated = Some(Utc::now());
    }

    /// Account line as displayed
    pub fn account_line(&self) -> String {
        match &self.account {
            Some(snapshot) => snapshot.render(),
            None => "Equity: N/A | Balance: N/A | Margin: N/A".to_string(),
        }
    }

    /// Append a log line, keeping the scrolled-back view in place
    pub fn push_log(&mut self, event: LogEvent) {
        self.total_log_lines += 1;
        if event.is_error() {
            self.error_log_lines += 1;
        }

        self.logs.push_back(event);
        if self.log_scroll_offset > 0 {
            self.log_scroll_offset += 1;
        }

        while self.logs.len() > self.max_log_lines {
            self.logs.pop_front();
            self.dropped_log_lines += 1;
        }
        self.log_scroll_offset = self.log_scroll_offset.min(self.logs.len().saturating_sub(1));
    }

    /// Lines to show in a panel `height` rows tall
    pub fn visible_logs(&self, height: usize) -> impl Iterator<Item = &LogEvent> {
        let end = self.logs.len().saturating_sub(self.log_scroll_offset);
        let start = end.saturating_sub(height);
        self.logs.range(start..end)
    }

    /// Scroll towards older lines
    pub fn scroll_up(&mut self) {
        if self.log_scroll_offset < self.logs.len().saturating_sub(1) {
            self.log_scroll_offset += 1;
        }
    }

    /// Scroll towards newer lines
    pub fn scroll_down(&mut self) {
        self.log_scroll_offset = self.log_scroll_offset.saturating_sub(1);
    }

    /// Follow the newest line again
    pub fn scroll_to_tail(&mut self) {
        self.log_scroll_offset = 0;
    }

    pub fn lot_up(&mut self) {
        self.lot_input = self.lot_input.step_up();
    }

    pub fn lot_down(&mut self) {
        self.lot_input = self.lot_input.step_down();
    }

    /// Open the lot entry field, pre-filled with the current input
    pub fn begin_lot_entry(&mut self) {
        self.lot_entry = Some(self.lot_input.to_string());
    }

    pub fn is_editing_lot(&self) -> bool {
        self.lot_entry.is_some()
    }

    pub fn lot_entry_push(&mut self, c: char) {
        if let Some(entry) = self.lot_entry.as_mut() {
            if entry.len() < MAX_ENTRY_LEN {
                entry.push(c);
            }
        }
    }

    pub fn lot_entry_pop(&mut self) {
        if let Some(entry) = self.lot_entry.as_mut() {
            entry.pop();
        }
    }

    pub fn cancel_lot_entry(&mut self) {
        self.lot_entry = None;
    }

    /// Close the entry field and apply it. An invalid or out-of-range
    /// value leaves the input unchanged and is returned as the error.
    pub fn commit_lot_entry(&mut self) -> Result<Lot> {
        let entry = self.lot_entry.take().unwrap_or_default();
        let lot: Lot = entry.parse()?;
        self.lot_input = lot;
        Ok(lot)
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}
