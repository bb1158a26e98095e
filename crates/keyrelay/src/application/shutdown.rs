//! Orderly-shutdown request flag.

use std::sync::atomic::{AtomicBool, Ordering};

/// Read side of the flag an interrupt handler sets.
///
/// Wraps a `'static` atomic because a signal handler can reach nothing else.
/// The run loop polls it between reads; cleanup itself always happens on the
/// main thread.
#[derive(Debug, Clone, Copy)]
pub struct ShutdownFlag {
    flag: &'static AtomicBool,
}

impl ShutdownFlag {
    pub const fn new(flag: &'static AtomicBool) -> Self {
        Self { flag }
    }

    /// Returns `true` once shutdown has been requested.
    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Requests shutdown from ordinary (non-signal) code.
    pub fn request(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}
