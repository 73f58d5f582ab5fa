//! Key mapping from terminal events to game commands.
//!
//! Bindings: arrow keys move and drop (↓ toggles soft drop, ↑ hard-drops),
//! `d`/`a` rotate clockwise/counter-clockwise, `p` pauses, `r` or Enter
//! starts/restarts, `q` or Ctrl-C quits the host.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use gridfall_types::Command;

/// Map a key press to a game command.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Left => Some(Command::MoveLeft),
        KeyCode::Right => Some(Command::MoveRight),
        KeyCode::Down => Some(Command::SoftDrop),
        KeyCode::Up => Some(Command::HardDrop),

        KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::RotateCw),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::RotateCcw),

        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Some(Command::Restart),

        _ => None,
    }
}

/// Whether the key should quit the host application.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
