//! Resolved input symbols.

use std::fmt;

use crate::keymap::keycode::KeyCode;

/// The ESC byte that introduces a terminal escape sequence.
pub const ESC: u8 = 0x1B;

/// The CSI introducer that follows [`ESC`] in cursor-key sequences.
pub const CSI_INTRODUCER: u8 = b'[';

/// A cursor key recognised from a three-byte `ESC [ x` sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorKey {
    Up,
    Down,
    Right,
    Left,
}

impl CursorKey {
    /// Every cursor key, in `ESC [ A`..`ESC [ D` order.
    pub const ALL: [CursorKey; 4] = [
        CursorKey::Up,
        CursorKey::Down,
        CursorKey::Right,
        CursorKey::Left,
    ];

    /// Resolves the two bytes that followed an [`ESC`].
    ///
    /// Returns `None` for anything other than the four CSI cursor sequences.
    pub fn from_escape_tail(tail: [u8; 2]) -> Option<Self> {
        match tail {
            [CSI_INTRODUCER, b'A'] => Some(CursorKey::Up),
            [CSI_INTRODUCER, b'B'] => Some(CursorKey::Down),
            [CSI_INTRODUCER, b'C'] => Some(CursorKey::Right),
            [CSI_INTRODUCER, b'D'] => Some(CursorKey::Left),
            _ => None,
        }
    }

    /// Device key produced by this cursor key.
    pub fn key_code(self) -> KeyCode {
        match self {
            CursorKey::Up => KeyCode::Up,
            CursorKey::Down => KeyCode::Down,
            CursorKey::Right => KeyCode::Right,
            CursorKey::Left => KeyCode::Left,
        }
    }
}

/// One logical keystroke read from the terminal.
///
/// Plain bytes and cursor keys are kept apart so that `ESC [ A` (cursor up)
/// can never be confused with the letter `A`, whose byte value is the same as
/// the sequence's final byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A single terminal byte.
    Byte(u8),
    /// A recognised cursor-key escape sequence.
    Cursor(CursorKey),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Byte(byte) => write!(f, "{byte}"),
            Symbol::Cursor(key) => write!(f, "{key:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csi_cursor_tails_resolve_to_cursor_keys() {
        assert_eq!(CursorKey::from_escape_tail(*b"[A"), Some(CursorKey::Up));
        assert_eq!(CursorKey::from_escape_tail(*b"[B"), Some(CursorKey::Down));
        assert_eq!(CursorKey::from_escape_tail(*b"[C"), Some(CursorKey::Right));
        assert_eq!(CursorKey::from_escape_tail(*b"[D"), Some(CursorKey::Left));
    }

    #[test]
    fn test_unrecognised_tails_resolve_to_none() {
        for tail in [*b"[Z", *b"OA", *b"[a", *b"AA", [0, 0]] {
            assert_eq!(CursorKey::from_escape_tail(tail), None, "{tail:?}");
        }
    }

    #[test]
    fn test_byte_symbols_display_as_decimal() {
        assert_eq!(Symbol::Byte(1).to_string(), "1");
        assert_eq!(Symbol::Byte(b'A').to_string(), "65");
    }
}
