//! RelaySession: owns the virtual keyboard and terminal mode for one run.
//!
//! The session is the single owner of both pieces of process-wide state the
//! relay touches:
//!
//! - the registered virtual keyboard ([`VirtualKeyboard`]), and
//! - the terminal's raw-mode setting ([`TerminalMode`]).
//!
//! Both are released together, exactly once, whichever way the run ends:
//! [`RelaySession::shutdown`] after the loop returns, or `Drop` if the session
//! is unwound by a panic.  The OS-specific implementations of both traits live
//! in the infrastructure layer.
//!
//! # Lifecycle
//!
//! ```text
//! UinputKeyboard::create()   open + declare keys + register   (infrastructure)
//! RelaySession::start()      settle delay, enter raw mode (best effort)
//! RelaySession::run()        read -> decode -> lookup -> tap, until EOF/shutdown
//! RelaySession::shutdown()   restore terminal, unregister + close device
//! ```

use std::io::{self, Read};
use std::thread;

use keyrelay_core::{relay_symbol, Decoded, EventSink, KeyMap, Relayed, Symbol, SymbolDecoder};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::config::SessionConfig;
use super::shutdown::ShutdownFlag;

/// Error from a terminal mode operation.
#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("standard input is not a terminal")]
    NotATerminal,
    #[error("terminal attribute call failed: {0}")]
    Io(#[from] io::Error),
}

/// Scoped raw-mode control for the controlling terminal.
#[cfg_attr(test, mockall::automock)]
pub trait TerminalMode {
    /// Switches to unbuffered, no-echo input, remembering the previous mode.
    fn enter_raw_mode(&mut self) -> Result<(), TerminalError>;

    /// Restores the mode saved by `enter_raw_mode`.
    ///
    /// A no-op when raw mode was never entered.
    fn restore_mode(&mut self) -> Result<(), TerminalError>;
}

/// A registered virtual keyboard.
pub trait VirtualKeyboard: EventSink {
    /// Unregisters the device and closes its node.
    ///
    /// Later writes fail with `DeviceError::Closed`.
    fn close(&mut self);
}

/// Why [`RelaySession::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The terminal input stream closed.
    EndOfInput,
    /// An interrupt or termination signal requested shutdown.
    ShutdownRequested,
    /// Reading the terminal failed with an error other than `EINTR`.
    ReadFailed,
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    /// Symbols decoded from the terminal.
    pub symbols: usize,
    /// Symbols with no mapping.
    pub unmapped: usize,
    /// Event groups the device rejected.
    pub failed_writes: usize,
}

/// Result of [`RelaySession::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub reason: StopReason,
    pub stats: RelayStats,
}

/// One relay run: translation table, device and terminal, owned together.
pub struct RelaySession<D: VirtualKeyboard, T: TerminalMode> {
    keymap: KeyMap,
    device: D,
    terminal: T,
    raw_mode: bool,
    released: bool,
}

impl<D: VirtualKeyboard, T: TerminalMode> RelaySession<D, T> {
    /// Waits for the freshly registered `device` to settle, then puts the
    /// terminal into raw mode.
    ///
    /// A terminal that refuses raw mode (stdin is a pipe or file, or the
    /// attribute calls fail) is reported and left as it is; input is still
    /// relayed, line by line if the terminal stays canonical.
    pub fn start(keymap: KeyMap, device: D, mut terminal: T, config: &SessionConfig) -> Self {
        if !config.settle_delay.is_zero() {
            debug!("waiting {:?} for the virtual keyboard to settle", config.settle_delay);
            thread::sleep(config.settle_delay);
        }

        let raw_mode = match terminal.enter_raw_mode() {
            Ok(()) => {
                info!("terminal in raw mode; type to relay keystrokes, Ctrl-C to quit");
                true
            }
            Err(e) => {
                warn!("cannot enter raw terminal mode ({e}); relaying input unchanged");
                false
            }
        };

        Self {
            keymap,
            device,
            terminal,
            raw_mode,
            released: false,
        }
    }

    #[cfg(test)]
    fn is_raw_mode(&self) -> bool {
        self.raw_mode
    }

    /// Relays symbols from `decoder` until input ends or shutdown is requested.
    ///
    /// Per-symbol problems (unmapped symbols, failed writes) are logged and
    /// counted; they never end the loop.
    pub fn run<R: Read>(&mut self, decoder: &mut SymbolDecoder<R>, shutdown: ShutdownFlag) -> RunSummary {
        let mut stats = RelayStats::default();
        let reason = loop {
            if shutdown.is_requested() {
                info!("shutdown requested");
                break StopReason::ShutdownRequested;
            }

            match decoder.next_symbol() {
                Ok(Decoded::Symbol(symbol)) => {
                    stats.symbols += 1;
                    match self.relay(symbol) {
                        Relayed::Tapped(report) => stats.failed_writes += report.failed,
                        Relayed::Unmapped => stats.unmapped += 1,
                    }
                }
                Ok(Decoded::EndOfInput) => {
                    info!("end of terminal input");
                    break StopReason::EndOfInput;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    error!("terminal read failed: {e}");
                    break StopReason::ReadFailed;
                }
            }
        };
        RunSummary { reason, stats }
    }

    /// Translates and taps a single symbol.
    pub fn relay(&mut self, symbol: Symbol) -> Relayed {
        relay_symbol(&self.keymap, &mut self.device, symbol)
    }

    /// Restores the terminal and closes the device.
    pub fn shutdown(mut self) {
        self.release();
    }

    #[cfg(test)]
    fn device(&self) -> &D {
        &self.device
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        if self.raw_mode {
            if let Err(e) = self.terminal.restore_mode() {
                warn!("failed to restore terminal mode: {e}");
            }
        }
        self.device.close();
        info!("virtual keyboard released");
    }
}

impl<D: VirtualKeyboard, T: TerminalMode> Drop for RelaySession<D, T> {
    fn drop(&mut self) {
        self.release();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
