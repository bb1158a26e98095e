//! # keyrelay-core
//!
//! The keystroke-to-event pipeline behind `keyrelay`, with no OS dependencies.
//!
//! `keyrelay` reads characters typed at a terminal and replays them as key
//! events on a Linux virtual keyboard.  This crate holds the parts of that
//! pipeline that can be reasoned about (and tested) without a TTY or
//! `/dev/uinput`:
//!
//! - **`input`** – decodes the terminal byte stream into [`Symbol`]s,
//!   resolving the three-byte cursor-key escape sequences.
//!
//! - **`keymap`** – the fixed translation table from symbols to Linux key codes
//!   plus a shift flag, and the key capability set the device must declare.
//!
//! - **`emit`** – the press/release protocol: which records are written, in
//!   which order, for one tap of a key.
//!
//! - **`domain`** – the virtual device's name, `input_id` and capabilities.
//!
//! - **`relay`** – one lookup-then-tap step, with the unmapped-symbol
//!   diagnostic.
//!
//! # Data flow
//!
//! ```text
//! bytes ─▶ SymbolDecoder ─▶ Symbol ─▶ KeyMap::lookup ─▶ KeyMapping ─▶ emit_tap ─▶ EventSink
//! ```

pub mod domain;
pub mod emit;
pub mod input;
pub mod keymap;
pub mod relay;

pub use domain::device::{DeviceIdentity, DeviceSpec};
pub use emit::{emit_tap, DeviceError, EventRecord, EventSink, KeyState, TapReport};
pub use input::{CursorKey, Decoded, Symbol, SymbolDecoder};
pub use keymap::{KeyCode, KeyMap, KeyMapping};
pub use relay::{relay_symbol, Relayed};
