//! Key handling for the console

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key action derived from key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Quit the console
    Quit,
    /// Start the agent with the current lot input
    StartAgent,
    /// Stop the agent
    StopAgent,
    /// Lot input +0.01
    LotUp,
    /// Lot input -0.01
    LotDown,
    /// Type a lot value
    EditLot,
    /// Scroll log towards older lines
    ScrollUp,
    /// Scroll log towards newer lines
    ScrollDown,
    /// Follow the newest log lines again
    ScrollToTail,
    /// Show help
    Help,
    /// No action
    None,
}

impl From<KeyEvent> for KeyAction {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
            KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('s') => KeyAction::StartAgent,
            KeyCode::Char('x') => KeyAction::StopAgent,
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => KeyAction::LotUp,
            KeyCode::Char('-') | KeyCode::Left => KeyAction::LotDown,
            KeyCode::Char('e') => KeyAction::EditLot,
            KeyCode::Up | KeyCode::Char('k') => KeyAction::ScrollUp,
            KeyCode::Down | KeyCode::Char('j') => KeyAction::ScrollDown,
            KeyCode::Char('g') | KeyCode::End => KeyAction::ScrollToTail,
            KeyCode::Char('?') => KeyAction::Help,
            _ => KeyAction::None,
        }
    }
}

/// Key while the lot entry field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKey {
    Commit,
    Cancel,
    Backspace,
    Input(char),
    Ignore,
}

impl From<KeyEvent> for EntryKey {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Enter => EntryKey::Commit,
            KeyCode::Esc => EntryKey::Cancel,
            KeyCode::Backspace => EntryKey::Backspace,
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                    EntryKey::Input(c)
                } else {
                    EntryKey::Ignore
                }
            }
            _ => EntryKey::Ignore,
        }
    }
}
