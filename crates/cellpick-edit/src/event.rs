//! Input events and the key map
//!
//! The host toolkit translates its input into [`Event`]s. Key presses go
//! through a [`Keymap`] that turns them into [`Command`]s, so bindings can
//! be changed without touching the dispatcher.

use std::collections::HashMap;

/// A key press
///
/// Letters are case-insensitive; `Key::char` normalizes them to uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Return,
    Enter,
}

impl Key {
    /// Key for a character, letters folded to uppercase
    pub fn char(c: char) -> Self {
        Key::Char(c.to_ascii_uppercase())
    }

    fn normalized(self) -> Self {
        match self {
            Key::Char(c) => Key::char(c),
            other => other,
        }
    }
}

/// Input delivered to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Plain click at pixel (x, y)
    Click { x: u32, y: u32 },
    /// Shift-click at pixel (x, y)
    ShiftClick { x: u32, y: u32 },
    /// Key press
    Key(Key),
}

/// Action bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetMaskNumber(u16),
    Revert,
    DecrementContrast,
    IncrementContrast,
    DecrementDiskSize,
    IncrementDiskSize,
    DecrementCellRadius,
    IncrementCellRadius,
    TogglePolygon,
    FinalizePolygon,
    ToggleSquare,
    ToggleCircle,
    ToggleLegacyGrowth,
    CorrelateLastRoi,
    InfoLastRoi,
    ClearMode,
    Close,
}

/// Key bindings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    bindings: HashMap<Key, Command>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        for n in 1..=8u16 {
            if let Some(c) = char::from_digit(n as u32, 10) {
                bindings.insert(Key::Char(c), Command::SetMaskNumber(n));
            }
        }
        let chars = [
            ('Z', Command::Revert),
            ('-', Command::DecrementContrast),
            ('=', Command::IncrementContrast),
            ('+', Command::IncrementContrast),
            ('[', Command::DecrementDiskSize),
            (']', Command::IncrementDiskSize),
            (',', Command::DecrementCellRadius),
            ('.', Command::IncrementCellRadius),
            ('P', Command::TogglePolygon),
            ('T', Command::FinalizePolygon),
            ('S', Command::ToggleSquare),
            ('C', Command::ToggleCircle),
            ('G', Command::ToggleLegacyGrowth),
            ('K', Command::CorrelateLastRoi),
            ('I', Command::InfoLastRoi),
            ('X', Command::ClearMode),
        ];
        for (c, command) in chars {
            bindings.insert(Key::Char(c), command);
        }
        bindings.insert(Key::Return, Command::Close);
        bindings.insert(Key::Enter, Command::Close);
        Self { bindings }
    }
}

impl Keymap {
    /// Keymap with no bindings
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind `key` to `command`, replacing any previous binding
    pub fn with_binding(mut self, key: Key, command: Command) -> Self {
        self.bindings.insert(key.normalized(), command);
        self
    }

    /// Remove the binding for `key`
    pub fn unbind(&mut self, key: Key) -> Option<Command> {
        self.bindings.remove(&key.normalized())
    }

    pub fn lookup(&self, key: Key) -> Option<Command> {
        self.bindings.get(&key.normalized()).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let km = Keymap::default();
        assert_eq!(km.lookup(Key::Char('3')), Some(Command::SetMaskNumber(3)));
        assert_eq!(km.lookup(Key::Char('9')), None);
        assert_eq!(km.lookup(Key::Char('0')), None);
        assert_eq!(km.lookup(Key::Char('z')), Some(Command::Revert));
        assert_eq!(km.lookup(Key::Char('+')), Some(Command::IncrementContrast));
        assert_eq!(km.lookup(Key::Char('=')), Some(Command::IncrementContrast));
        assert_eq!(km.lookup(Key::Return), Some(Command::Close));
        assert_eq!(km.lookup(Key::Enter), Some(Command::Close));
        assert_eq!(km.lookup(Key::Char('g')), Some(Command::ToggleLegacyGrowth));
        assert_eq!(km.len(), 8 + 16 + 2);
    }

    #[test]
    fn test_rebind() {
        let mut km = Keymap::default().with_binding(Key::Char('u'), Command::Revert);
        assert_eq!(km.lookup(Key::Char('U')), Some(Command::Revert));
        assert_eq!(km.unbind(Key::Char('z')), Some(Command::Revert));
        assert_eq!(km.lookup(Key::Char('Z')), None);
        assert!(Keymap::empty().is_empty());
    }
}
