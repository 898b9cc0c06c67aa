//! Key mapping from terminal events to game commands.

use crate::types::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Action(Action),
    /// Start a new game
    Restart,
}

/// Map keyboard input to a command.
pub fn handle_key_event(key: KeyEvent) -> Option<KeyCommand> {
    let action = match key.code {
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Action::Left,
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Action::Right,
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Action::Down,
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W' | ' ') => Action::Rotate,
        KeyCode::Char('r' | 'R') => return Some(KeyCommand::Restart),
        _ => return None,
    };
    Some(KeyCommand::Action(action))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(code: KeyCode) -> Option<KeyCommand> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(action(KeyCode::Left), Some(KeyCommand::Action(Action::Left)));
        assert_eq!(action(KeyCode::Right), Some(KeyCommand::Action(Action::Right)));
        assert_eq!(action(KeyCode::Down), Some(KeyCommand::Action(Action::Down)));

        assert_eq!(action(KeyCode::Char('H')), Some(KeyCommand::Action(Action::Left)));
        assert_eq!(action(KeyCode::Char('d')), Some(KeyCommand::Action(Action::Right)));
        assert_eq!(action(KeyCode::Char('j')), Some(KeyCommand::Action(Action::Down)));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(action(KeyCode::Up), Some(KeyCommand::Action(Action::Rotate)));
        assert_eq!(action(KeyCode::Char('w')), Some(KeyCommand::Action(Action::Rotate)));
        assert_eq!(action(KeyCode::Char(' ')), Some(KeyCommand::Action(Action::Rotate)));
    }

    #[test]
    fn test_restart_and_unmapped_keys() {
        assert_eq!(action(KeyCode::Char('r')), Some(KeyCommand::Restart));
        assert_eq!(action(KeyCode::Char('x')), None);
        assert_eq!(action(KeyCode::Enter), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}
