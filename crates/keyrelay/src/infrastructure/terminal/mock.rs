//! Mock terminal mode for tests.
//!
//! Counts raw-mode entries and restores instead of touching termios, so a test
//! can check that the terminal is restored exactly once however the session
//! ends.  Like the mock keyboard, the counters are shared between clones.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::application::relay_session::{TerminalError, TerminalMode};

#[derive(Debug, Clone, Default)]
pub struct MockTerminal {
    enters: Arc<AtomicUsize>,
    restores: Arc<AtomicUsize>,
    raw: bool,
    /// When `true`, `enter_raw_mode` fails as if stdin were not a terminal.
    pub fail_enter: bool,
}

impl MockTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// A terminal that refuses raw mode.
    pub fn not_a_terminal() -> Self {
        Self {
            fail_enter: true,
            ..Self::default()
        }
    }

    pub fn enter_count(&self) -> usize {
        self.enters.load(Ordering::SeqCst)
    }

    /// Restores that actually left raw mode.
    pub fn restore_count(&self) -> usize {
        self.restores.load(Ordering::SeqCst)
    }
}

impl TerminalMode for MockTerminal {
    fn enter_raw_mode(&mut self) -> Result<(), TerminalError> {
        if self.fail_enter {
            return Err(TerminalError::NotATerminal);
        }
        self.raw = true;
        self.enters.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn restore_mode(&mut self) -> Result<(), TerminalError> {
        if self.raw {
            self.raw = false;
            self.restores.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}
