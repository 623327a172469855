//! Key mapping from terminal events to host commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Commands handled by the host rather than the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// Deal a fresh board and reset the score.
    Restart,
    /// Keep swaps that make no match instead of reverting them.
    ToggleFreeSwap,
}

/// Map keyboard input to host commands.
pub fn handle_key_event(key: KeyEvent) -> Option<HostCommand> {
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => Some(HostCommand::Restart),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(HostCommand::ToggleFreeSwap),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
