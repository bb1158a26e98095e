//! Linux input key codes (`KEY_*` from `linux/input-event-codes.h`).
//!
//! These are the identifiers a physical keyboard attached to a Linux host puts
//! in the `code` field of an `EV_KEY` event.  The virtual keyboard uses the
//! same values, which is what makes its events indistinguishable from real
//! hardware.
//!
//! Reference: <https://github.com/torvalds/linux/blob/master/include/uapi/linux/input-event-codes.h>
//!
//! # Key codes are positions, not characters (for beginners)
//!
//! A key code names a *physical key*, not the character it produces.  There is
//! one code for the key labelled "A" and the kernel has no separate code for
//! upper-case `A`; typing `A` on a real keyboard means holding `KEY_LEFTSHIFT`
//! while tapping `KEY_A`.  The same holds for punctuation: `!` is shift plus
//! `KEY_1` on a US layout.
//!
//! | Key          | Code |
//! |--------------|------|
//! | Escape       | 1    |
//! | Letter A     | 30   |
//! | Left Shift   | 42   |
//! | Arrow Up     | 103  |
//!
//! Only the keys the translation table can produce are listed, plus
//! [`KeyCode::LeftShift`], which the emitter synthesizes on its own.

/// Linux `KEY_*` code for a key on the virtual keyboard.
///
/// The discriminant of each variant is its kernel key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum KeyCode {
    Esc = 1,

    // Digit row (KEY_1..KEY_0 are 2..11)
    Digit1 = 2,
    Digit2 = 3,
    Digit3 = 4,
    Digit4 = 5,
    Digit5 = 6,
    Digit6 = 7,
    Digit7 = 8,
    Digit8 = 9,
    Digit9 = 10,
    Digit0 = 11,
    Minus = 12,
    Equal = 13,
    Backspace = 14,
    Tab = 15,

    // Top letter row
    Q = 16,
    W = 17,
    E = 18,
    R = 19,
    T = 20,
    Y = 21,
    U = 22,
    I = 23,
    O = 24,
    P = 25,
    LeftBrace = 26,
    RightBrace = 27,
    Enter = 28,

    // Home row
    A = 30,
    S = 31,
    D = 32,
    F = 33,
    G = 34,
    H = 35,
    J = 36,
    K = 37,
    L = 38,
    Semicolon = 39,
    Apostrophe = 40,
    Grave = 41,
    LeftShift = 42,
    Backslash = 43,

    // Bottom row
    Z = 44,
    X = 45,
    C = 46,
    V = 47,
    B = 48,
    N = 49,
    M = 50,
    Comma = 51,
    Dot = 52,
    Slash = 53,

    Space = 57,

    // Cursor keys
    Up = 103,
    Left = 105,
    Right = 106,
    Down = 108,
}

impl KeyCode {
    /// Letter keys in alphabetical order, `A` first.
    ///
    /// Alphabetical order does not follow the kernel numbering (which follows
    /// the QWERTY rows), so the table builder indexes this array instead of
    /// doing arithmetic on codes.
    pub const LETTERS: [KeyCode; 26] = [
        KeyCode::A,
        KeyCode::B,
        KeyCode::C,
        KeyCode::D,
        KeyCode::E,
        KeyCode::F,
        KeyCode::G,
        KeyCode::H,
        KeyCode::I,
        KeyCode::J,
        KeyCode::K,
        KeyCode::L,
        KeyCode::M,
        KeyCode::N,
        KeyCode::O,
        KeyCode::P,
        KeyCode::Q,
        KeyCode::R,
        KeyCode::S,
        KeyCode::T,
        KeyCode::U,
        KeyCode::V,
        KeyCode::W,
        KeyCode::X,
        KeyCode::Y,
        KeyCode::Z,
    ];

    /// Digit keys indexed by their digit value, `KEY_0` first.
    pub const DIGITS: [KeyCode; 10] = [
        KeyCode::Digit0,
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
        KeyCode::Digit8,
        KeyCode::Digit9,
    ];

    /// Returns the raw kernel key code.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Returns the `KEY_*` name used in `input-event-codes.h`.
    pub fn name(self) -> &'static str {
        match self {
            KeyCode::Esc => "KEY_ESC",
            KeyCode::Digit1 => "KEY_1",
            KeyCode::Digit2 => "KEY_2",
            KeyCode::Digit3 => "KEY_3",
            KeyCode::Digit4 => "KEY_4",
            KeyCode::Digit5 => "KEY_5",
            KeyCode::Digit6 => "KEY_6",
            KeyCode::Digit7 => "KEY_7",
            KeyCode::Digit8 => "KEY_8",
            KeyCode::Digit9 => "KEY_9",
            KeyCode::Digit0 => "KEY_0",
            KeyCode::Minus => "KEY_MINUS",
            KeyCode::Equal => "KEY_EQUAL",
            KeyCode::Backspace => "KEY_BACKSPACE",
            KeyCode::Tab => "KEY_TAB",
            KeyCode::Q => "KEY_Q",
            KeyCode::W => "KEY_W",
            KeyCode::E => "KEY_E",
            KeyCode::R => "KEY_R",
            KeyCode::T => "KEY_T",
            KeyCode::Y => "KEY_Y",
            KeyCode::U => "KEY_U",
            KeyCode::I => "KEY_I",
            KeyCode::O => "KEY_O",
            KeyCode::P => "KEY_P",
            KeyCode::LeftBrace => "KEY_LEFTBRACE",
            KeyCode::RightBrace => "KEY_RIGHTBRACE",
            KeyCode::Enter => "KEY_ENTER",
            KeyCode::A => "KEY_A",
            KeyCode::S => "KEY_S",
            KeyCode::D => "KEY_D",
            KeyCode::F => "KEY_F",
            KeyCode::G => "KEY_G",
            KeyCode::H => "KEY_H",
            KeyCode::J => "KEY_J",
            KeyCode::K => "KEY_K",
            KeyCode::L => "KEY_L",
            KeyCode::Semicolon => "KEY_SEMICOLON",
            KeyCode::Apostrophe => "KEY_APOSTROPHE",
            KeyCode::Grave => "KEY_GRAVE",
            KeyCode::LeftShift => "KEY_LEFTSHIFT",
            KeyCode::Backslash => "KEY_BACKSLASH",
            KeyCode::Z => "KEY_Z",
            KeyCode::X => "KEY_X",
            KeyCode::C => "KEY_C",
            KeyCode::V => "KEY_V",
            KeyCode::B => "KEY_B",
            KeyCode::N => "KEY_N",
            KeyCode::M => "KEY_M",
            KeyCode::Comma => "KEY_COMMA",
            KeyCode::Dot => "KEY_DOT",
            KeyCode::Slash => "KEY_SLASH",
            KeyCode::Space => "KEY_SPACE",
            KeyCode::Up => "KEY_UP",
            KeyCode::Left => "KEY_LEFT",
            KeyCode::Right => "KEY_RIGHT",
            KeyCode::Down => "KEY_DOWN",
        }
    }
}

impl std::fmt::Display for KeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
