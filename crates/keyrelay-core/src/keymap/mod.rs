//! Symbol to key-code translation.
//!
//! [`KeyMap`] is the immutable lookup structure the relay consults for every
//! keystroke.  It is built once from [`table::entries`] and answers
//! `lookup(symbol) -> Option<KeyMapping>` in constant time.

pub mod keycode;
pub mod table;

use std::collections::BTreeSet;

pub use keycode::KeyCode;

use crate::input::symbol::{CursorKey, Symbol};

/// What to press for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyMapping {
    /// Key to tap on the virtual keyboard.
    pub device_key: KeyCode,
    /// Whether `KEY_LEFTSHIFT` must be held around the tap.
    pub shift_required: bool,
}

impl KeyMapping {
    /// A mapping that taps `device_key` without shift.
    pub const fn plain(device_key: KeyCode) -> Self {
        Self {
            device_key,
            shift_required: false,
        }
    }

    /// A mapping that taps `device_key` with shift held.
    pub const fn shifted(device_key: KeyCode) -> Self {
        Self {
            device_key,
            shift_required: true,
        }
    }
}

/// Translation table over all 256 terminal bytes plus the cursor keys.
#[derive(Debug, Clone)]
pub struct KeyMap {
    bytes: [Option<KeyMapping>; 256],
}

impl KeyMap {
    /// Builds the canonical US-layout table.
    pub fn new() -> Self {
        let mut bytes = [None; 256];
        for entry in table::entries() {
            let slot = &mut bytes[usize::from(entry.symbol)];
            debug_assert!(slot.is_none(), "symbol {} mapped twice", entry.symbol);
            *slot = Some(KeyMapping {
                device_key: entry.key,
                shift_required: entry.shift,
            });
        }
        Self { bytes }
    }

    /// Looks up the key for `symbol`.
    ///
    /// Returns `None` when the symbol has no mapping.  Cursor keys always map.
    pub fn lookup(&self, symbol: Symbol) -> Option<KeyMapping> {
        match symbol {
            Symbol::Byte(byte) => self.bytes[usize::from(byte)],
            Symbol::Cursor(cursor) => Some(KeyMapping::plain(cursor.key_code())),
        }
    }

    /// Every key this table can emit, plus `KEY_LEFTSHIFT`.
    ///
    /// This is the key capability set declared when the virtual device is
    /// registered.  Shift is always included because the emitter may assert
    /// it for any shifted symbol.
    pub fn capabilities(&self) -> BTreeSet<KeyCode> {
        let mut keys: BTreeSet<KeyCode> = self
            .bytes
            .iter()
            .flatten()
            .map(|mapping| mapping.device_key)
            .collect();
        keys.extend(CursorKey::ALL.iter().map(|cursor| cursor.key_code()));
        keys.insert(KeyCode::LeftShift);
        keys
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn byte(b: u8) -> Symbol {
        Symbol::Byte(b)
    }

    #[test]
    fn test_lookup_is_deterministic_over_whole_domain() {
        // Arrange
        let map = KeyMap::new();
        let other = KeyMap::new();

        // Act / Assert
        for b in 0..=u8::MAX {
            let first = map.lookup(byte(b));
            assert_eq!(first, map.lookup(byte(b)), "repeat lookup of {b}");
            assert_eq!(first, other.lookup(byte(b)), "second table, symbol {b}");
        }
        for cursor in CursorKey::ALL {
            assert_eq!(
                map.lookup(Symbol::Cursor(cursor)),
                map.lookup(Symbol::Cursor(cursor))
            );
        }
    }

    #[test]
    fn test_lower_and_upper_case_share_key_with_opposite_shift() {
        let map = KeyMap::new();

        for lower in b'a'..=b'z' {
            // Arrange
            let upper = lower.to_ascii_uppercase();

            // Act
            let lo = map.lookup(byte(lower)).expect("lower-case letter is mapped");
            let up = map.lookup(byte(upper)).expect("upper-case letter is mapped");

            // Assert
            assert_eq!(lo.device_key, up.device_key, "{}", lower as char);
            assert!(!lo.shift_required, "{} must not need shift", lower as char);
            assert!(up.shift_required, "{} must need shift", upper as char);
        }
    }

    #[test]
    fn test_exclamation_mark_is_shifted_one() {
        let map = KeyMap::new();

        assert_eq!(map.lookup(byte(b'!')), Some(KeyMapping::shifted(KeyCode::Digit1)));
        assert_eq!(map.lookup(byte(b'1')), Some(KeyMapping::plain(KeyCode::Digit1)));
    }

    #[test]
    fn test_explicit_control_characters_are_mapped() {
        let map = KeyMap::new();

        assert_eq!(map.lookup(byte(0x08)), Some(KeyMapping::plain(KeyCode::Backspace)));
        assert_eq!(map.lookup(byte(0x7F)), Some(KeyMapping::plain(KeyCode::Backspace)));
        assert_eq!(map.lookup(byte(b'\n')), Some(KeyMapping::plain(KeyCode::Enter)));
        assert_eq!(map.lookup(byte(b'\t')), Some(KeyMapping::plain(KeyCode::Tab)));
        assert_eq!(map.lookup(byte(0x1B)), Some(KeyMapping::plain(KeyCode::Esc)));
        assert_eq!(map.lookup(byte(b' ')), Some(KeyMapping::plain(KeyCode::Space)));
    }

    #[test]
    fn test_other_control_characters_are_unmapped() {
        let map = KeyMap::new();
        let mapped_controls = [0x08, b'\t', b'\n', 0x1B];

        for b in (0u8..0x20).filter(|b| !mapped_controls.contains(b)) {
            assert_eq!(map.lookup(byte(b)), None, "control byte {b} should be unmapped");
        }
    }

    #[test]
    fn test_high_bytes_are_unmapped() {
        let map = KeyMap::new();

        for b in 0x80..=u8::MAX {
            assert_eq!(map.lookup(byte(b)), None);
        }
    }

    #[test]
    fn test_cursor_keys_do_not_alias_letters() {
        let map = KeyMap::new();

        assert_eq!(
            map.lookup(Symbol::Cursor(CursorKey::Up)),
            Some(KeyMapping::plain(KeyCode::Up))
        );
        assert_eq!(map.lookup(byte(b'A')), Some(KeyMapping::shifted(KeyCode::A)));
    }

    #[test]
    fn test_capabilities_cover_every_mapped_key_and_shift() {
        // Arrange
        let map = KeyMap::new();

        // Act
        let caps = map.capabilities();

        // Assert
        assert!(caps.contains(&KeyCode::LeftShift));
        for b in 0..=u8::MAX {
            if let Some(mapping) = map.lookup(byte(b)) {
                assert!(caps.contains(&mapping.device_key), "{:?}", mapping.device_key);
            }
        }
        for cursor in CursorKey::ALL {
            assert!(caps.contains(&cursor.key_code()));
        }
    }

    #[test]
    fn test_mapped_byte_count() {
        // 52 letters, 20 digit-row symbols, 22 punctuation symbols, 6 controls
        let map = KeyMap::new();
        let mapped = (0..=u8::MAX).filter(|&b| map.lookup(byte(b)).is_some()).count();
        assert_eq!(mapped, 100);
    }
}
