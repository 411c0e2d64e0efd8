//! Key mapping from terminal events to game commands.

use crate::types::GameCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map one key press to a command, 1:1, with no repeat handling.
///
/// Space hard drops while playing and restarts once the game is over.
pub fn map_key(key: KeyEvent, game_over: bool) -> Option<GameCommand> {
    if key.kind == KeyEventKind::Release || key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(GameCommand::MoveLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(GameCommand::MoveRight),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(GameCommand::SoftDrop),

        // Rotation
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(GameCommand::Rotate),

        // Actions
        KeyCode::Char(' ') if game_over => Some(GameCommand::Restart),
        KeyCode::Char(' ') => Some(GameCommand::HardDrop),
        KeyCode::Char('r' | 'R') => Some(GameCommand::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> Option<GameCommand> {
        map_key(KeyEvent::from(code), false)
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(press(KeyCode::Left), Some(GameCommand::MoveLeft));
        assert_eq!(press(KeyCode::Right), Some(GameCommand::MoveRight));
        assert_eq!(press(KeyCode::Down), Some(GameCommand::SoftDrop));

        assert_eq!(press(KeyCode::Char('H')), Some(GameCommand::MoveLeft));
        assert_eq!(press(KeyCode::Char('d')), Some(GameCommand::MoveRight));
        assert_eq!(press(KeyCode::Char('J')), Some(GameCommand::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(press(KeyCode::Up), Some(GameCommand::Rotate));
        assert_eq!(press(KeyCode::Char('W')), Some(GameCommand::Rotate));
        assert_eq!(press(KeyCode::Char('z')), None);
    }

    #[test]
    fn test_space_depends_on_game_over() {
        let space = KeyEvent::from(KeyCode::Char(' '));
        assert_eq!(map_key(space, false), Some(GameCommand::HardDrop));
        assert_eq!(map_key(space, true), Some(GameCommand::Restart));
        assert_eq!(press(KeyCode::Char('r')), Some(GameCommand::Restart));
    }

    #[test]
    fn test_release_and_ctrl_chords_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(release, false), None);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, false), None);
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_d, false), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}
