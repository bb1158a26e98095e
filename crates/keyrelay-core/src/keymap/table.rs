//! The canonical terminal-byte to key-code table (US layout).
//!
//! The table is written as a list of `(symbol, key, shift)` triples rather
//! than as a 256-slot literal so that every mapping is visible in one place
//! and shifted/unshifted partners sit next to each other.
//!
//! # Why does `'A'` carry a shift flag? (for beginners)
//!
//! A terminal hands us *characters*; a keyboard only has *keys*.  To type an
//! upper-case `A` a person holds Shift and presses the A key, so the table maps
//! `'A'` to `KEY_A` with `shift = true`, while `'a'` maps to the same key with
//! `shift = false`.  Shifted punctuation works the same way: `'!'` is Shift +
//! `KEY_1`.
//!
//! | Symbols                 | Key                | Shift    |
//! |-------------------------|--------------------|----------|
//! | `a`-`z` / `A`-`Z`       | `KEY_A`-`KEY_Z`    | no / yes |
//! | `0`-`9` / `)!@#$%^&*(`  | `KEY_0`-`KEY_9`    | no / yes |
//! | `-` / `_`               | `KEY_MINUS`        | no / yes |
//! | space                   | `KEY_SPACE`        | no       |
//! | ESC (27)                | `KEY_ESC`          | no       |
//! | BS (8), DEL (127)       | `KEY_BACKSPACE`    | no       |
//! | LF (10)                 | `KEY_ENTER`        | no       |
//! | TAB (9)                 | `KEY_TAB`          | no       |

use super::keycode::KeyCode;

/// One row of the translation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableEntry {
    pub symbol: u8,
    pub key: KeyCode,
    pub shift: bool,
}

impl TableEntry {
    const fn plain(symbol: u8, key: KeyCode) -> Self {
        Self { symbol, key, shift: false }
    }

    const fn shifted(symbol: u8, key: KeyCode) -> Self {
        Self { symbol, key, shift: true }
    }
}

/// Shifted symbols of the digit row, indexed by digit.
const DIGIT_ROW_SHIFTED: &[u8; 10] = b")!@#$%^&*(";

/// Punctuation keys as `(unshifted, shifted, key)`.
const PUNCTUATION: &[(u8, u8, KeyCode)] = &[
    (b'\'', b'"', KeyCode::Apostrophe),
    (b'\\', b'|', KeyCode::Backslash),
    (b',', b'<', KeyCode::Comma),
    (b'.', b'>', KeyCode::Dot),
    (b'=', b'+', KeyCode::Equal),
    (b'`', b'~', KeyCode::Grave),
    (b'[', b'{', KeyCode::LeftBrace),
    (b']', b'}', KeyCode::RightBrace),
    (b';', b':', KeyCode::Semicolon),
    (b'/', b'?', KeyCode::Slash),
    (b'-', b'_', KeyCode::Minus),
];

/// Whitespace and control bytes that map to a key without shift.
const CONTROL: &[TableEntry] = &[
    TableEntry::plain(b' ', KeyCode::Space),
    TableEntry::plain(0x1B, KeyCode::Esc),
    TableEntry::plain(0x08, KeyCode::Backspace),
    TableEntry::plain(0x7F, KeyCode::Backspace),
    TableEntry::plain(b'\n', KeyCode::Enter),
    TableEntry::plain(b'\t', KeyCode::Tab),
];

/// Returns every mapped terminal byte.
///
/// Each symbol appears exactly once.
pub fn entries() -> Vec<TableEntry> {
    let mut rows = Vec::with_capacity(2 * 26 + 2 * 10 + 2 * PUNCTUATION.len() + CONTROL.len());

    for (offset, &key) in KeyCode::LETTERS.iter().enumerate() {
        rows.push(TableEntry::plain(b'a' + offset as u8, key));
        rows.push(TableEntry::shifted(b'A' + offset as u8, key));
    }

    for (digit, &key) in KeyCode::DIGITS.iter().enumerate() {
        rows.push(TableEntry::plain(b'0' + digit as u8, key));
        rows.push(TableEntry::shifted(DIGIT_ROW_SHIFTED[digit], key));
    }

    for &(lower, upper, key) in PUNCTUATION {
        rows.push(TableEntry::plain(lower, key));
        rows.push(TableEntry::shifted(upper, key));
    }

    rows.extend_from_slice(CONTROL);
    rows
}
