//! Key bindings: maps terminal key events to controller actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions that can be triggered by keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Append a fragment (digit, operator, or function token).
    Append(&'static str),
    Evaluate,
    DeleteLast,
    Clear,
    SelectUp,
    SelectDown,
    /// Load the selected history entry's expression into the buffer.
    Recall,
    RefreshHistory,
    OpenSearch,
    ClearHistory,
    ToggleTheme,
    Quit,
    /// Ignored input.
    None,
}

/// Printable keys and the fragment each one appends.
pub const KEYPAD: &[(char, &str)] = &[
    ('0', "0"),
    ('1', "1"),
    ('2', "2"),
    ('3', "3"),
    ('4', "4"),
    ('5', "5"),
    ('6', "6"),
    ('7', "7"),
    ('8', "8"),
    ('9', "9"),
    ('.', "."),
    ('+', "+"),
    ('-', "-"),
    ('*', "*"),
    ('/', "/"),
    ('%', "%"),
    ('^', "^"),
    ('(', "("),
    (')', ")"),
    (' ', " "),
    ('s', "sin("),
    ('c', "cos("),
    ('t', "tan("),
    ('l', "log("),
    ('q', "sqrt("),
    ('!', "factorial("),
];

/// Fragment appended by printable key `ch`, if it is bound.
pub fn keypad_fragment(ch: char) -> Option<&'static str> {
    KEYPAD
        .iter()
        .find(|(key, _)| *key == ch)
        .map(|(_, fragment)| *fragment)
}

/// Map one key event to an action.
pub fn map_key(event: KeyEvent) -> KeyAction {
    let KeyEvent {
        code, modifiers, ..
    } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c' | 'd') => KeyAction::Quit,
            KeyCode::Char('r') => KeyAction::RefreshHistory,
            KeyCode::Char('f') => KeyAction::OpenSearch,
            KeyCode::Char('x') => KeyAction::ClearHistory,
            KeyCode::Char('t') => KeyAction::ToggleTheme,
            _ => KeyAction::None,
        };
    }

    match code {
        KeyCode::Enter | KeyCode::Char('=') => KeyAction::Evaluate,
        KeyCode::Backspace => KeyAction::DeleteLast,
        KeyCode::Delete | KeyCode::Esc => KeyAction::Clear,
        KeyCode::Up => KeyAction::SelectUp,
        KeyCode::Down => KeyAction::SelectDown,
        KeyCode::Tab => KeyAction::Recall,
        KeyCode::Char(ch) => keypad_fragment(ch)
            .map(KeyAction::Append)
            .unwrap_or(KeyAction::None),
        _ => KeyAction::None,
    }
}
