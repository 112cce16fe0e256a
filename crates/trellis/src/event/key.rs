//! Keyboard input primitives.
use std::ops::Add;

/// Modifier key state.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Mods {
    /// Shift is active.
    pub shift: bool,
    /// Control is active.
    pub ctrl: bool,
    /// Alt is active.
    pub alt: bool,
}

impl Mods {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    /// Shift only.
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    /// Control only.
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };
}

impl Add<Self> for Mods {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self {
            shift: self.shift || other.shift,
            ctrl: self.ctrl || other.ctrl,
            alt: self.alt || other.alt,
        }
    }
}

/// A logical key.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Key {
    /// Tab; with shift, reverse traversal.
    Tab,
    /// Enter/Return.
    Enter,
    /// Space bar.
    Space,
    /// Escape.
    Esc,
    /// Backspace.
    Backspace,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home.
    Home,
    /// End.
    End,
    /// A printable character.
    Char(char),
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        match c {
            ' ' => Self::Space,
            '\t' => Self::Tab,
            '\n' | '\r' => Self::Enter,
            c => Self::Char(c),
        }
    }
}

/// Key transition.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum KeyAction {
    /// Key pressed.
    Down,
    /// Key released.
    Up,
}

/// A raw keyboard event from the host.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct KeyInput {
    /// Press or release.
    pub action: KeyAction,
    /// The key.
    pub key: Key,
    /// Modifiers held at the time.
    pub mods: Mods,
}

impl KeyInput {
    /// A key press with no modifiers.
    pub fn down(key: impl Into<Key>) -> Self {
        Self {
            action: KeyAction::Down,
            key: key.into(),
            mods: Mods::NONE,
        }
    }

    /// A key release with no modifiers.
    pub fn up(key: impl Into<Key>) -> Self {
        Self {
            action: KeyAction::Up,
            key: key.into(),
            mods: Mods::NONE,
        }
    }

    /// Is this a Tab press, with or without shift?
    pub fn is_tab(&self) -> bool {
        self.action == KeyAction::Down && self.key == Key::Tab
    }
}

/// Synthesize a key press by adding modifiers to a key.
impl Add<Key> for Mods {
    type Output = KeyInput;

    fn add(self, key: Key) -> Self::Output {
        KeyInput {
            action: KeyAction::Down,
            key,
            mods: self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_modifiers() {
        let k = Mods::SHIFT + Key::Tab;
        assert!(k.is_tab());
        assert!(k.mods.shift);
        assert!((Mods::SHIFT + Mods::CTRL).ctrl);
        assert_eq!(KeyInput::down(' ').key, Key::Space);
        assert!(!KeyInput::up(Key::Tab).is_tab());
    }
}
