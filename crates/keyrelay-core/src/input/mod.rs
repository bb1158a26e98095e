//! Terminal input decoding.
//!
//! - **`symbol`** – the [`Symbol`] type: a plain terminal byte or a cursor key.
//! - **`decoder`** – [`SymbolDecoder`], which turns a byte stream into symbols
//!   and resolves the `ESC [ A`..`ESC [ D` cursor sequences.

pub mod decoder;
pub mod symbol;

pub use decoder::{Decoded, SymbolDecoder};
pub use symbol::{CursorKey, Symbol};
