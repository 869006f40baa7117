//! Key mapping from terminal events to movement keys and host commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use maze_raider_types::Difficulty;

/// A held movement control tracked by the sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKey {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
    Run,
    Fire,
}

/// Discrete host-side commands (not part of the per-tick intent).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    Reset,
    SetDifficulty(Difficulty),
}

/// Map keyboard input to a held movement control.
pub fn movement_key(code: KeyCode) -> Option<MoveKey> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(MoveKey::Forward),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(MoveKey::Backward),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(MoveKey::StrafeLeft),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(MoveKey::StrafeRight),
        KeyCode::Left => Some(MoveKey::TurnLeft),
        KeyCode::Right => Some(MoveKey::TurnRight),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(MoveKey::Run),
        KeyCode::Char(' ') => Some(MoveKey::Fire),
        _ => None,
    }
}

/// Map keyboard input to a host command.
pub fn host_command(key: KeyEvent) -> Option<HostCommand> {
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => Some(HostCommand::Reset),
        KeyCode::Char('1') => Some(HostCommand::SetDifficulty(Difficulty::Easy)),
        KeyCode::Char('2') => Some(HostCommand::SetDifficulty(Difficulty::Normal)),
        KeyCode::Char('3') => Some(HostCommand::SetDifficulty(Difficulty::Hard)),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
