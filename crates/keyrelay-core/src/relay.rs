//! One pipeline step: symbol in, tap out.

use tracing::{trace, warn};

use crate::emit::{emit_tap, EventSink, TapReport};
use crate::input::Symbol;
use crate::keymap::KeyMap;

/// What happened to one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relayed {
    /// The symbol was mapped and its tap written (possibly with failures).
    Tapped(TapReport),
    /// The symbol has no mapping; nothing was written.
    Unmapped,
}

/// Looks `symbol` up in `keymap` and taps the result on `sink`.
///
/// An unmapped symbol is reported with a single `warn` diagnostic naming it.
pub fn relay_symbol<S: EventSink + ?Sized>(
    keymap: &KeyMap,
    sink: &mut S,
    symbol: Symbol,
) -> Relayed {
    match keymap.lookup(symbol) {
        Some(mapping) => {
            trace!(%symbol, key = %mapping.device_key, shift = mapping.shift_required, "tap");
            Relayed::Tapped(emit_tap(sink, mapping))
        }
        None => {
            warn!("unhandled key code: {symbol}");
            Relayed::Unmapped
        }
    }
}
