//! Key-tap emission protocol.
//!
//! Every symbol becomes exactly one discrete tap on the virtual keyboard:
//!
//! ```text
//! shift_required = false          shift_required = true
//! ----------------------          ---------------------
//!                                 KEY_LEFTSHIFT down, SYN_REPORT
//! key down, SYN_REPORT            key down,           SYN_REPORT
//! key up,   SYN_REPORT            key up,             SYN_REPORT
//!                                 KEY_LEFTSHIFT up,   SYN_REPORT
//! ```
//!
//! # Why a SYN_REPORT after every key record? (for beginners)
//!
//! The Linux input layer batches events into *frames*.  Readers of an event
//! device (libinput, X, games) buffer incoming records and only act on them
//! when a `SYN_REPORT` record closes the frame.  A key record that is never
//! followed by `SYN_REPORT` is simply never seen.  Each press and each release
//! is therefore written as its own two-record group.
//!
//! Groups are written one at a time through an [`EventSink`].  A failed write
//! is logged and the remaining groups are still attempted; nothing is retried.

use thiserror::Error;
use tracing::warn;

use crate::keymap::{KeyCode, KeyMapping};

/// `EV_SYN` event type.
pub const EV_SYN: u16 = 0x00;
/// `EV_KEY` event type.
pub const EV_KEY: u16 = 0x01;
/// `SYN_REPORT` code within `EV_SYN`.
pub const SYN_REPORT: u16 = 0x00;

/// Key-state value carried by an `EV_KEY` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Released = 0,
    Pressed = 1,
}

/// One record written to the virtual device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventRecord {
    /// `EV_KEY` record: `key` changed to `state`.
    Key { key: KeyCode, state: KeyState },
    /// `EV_SYN`/`SYN_REPORT` barrier closing the current frame.
    SyncReport,
}

impl EventRecord {
    /// Raw `(type, code, value)` triple as written into a kernel `input_event`.
    pub fn raw(self) -> (u16, u16, i32) {
        match self {
            EventRecord::Key { key, state } => (EV_KEY, key.code(), state as i32),
            EventRecord::SyncReport => (EV_SYN, SYN_REPORT, 0),
        }
    }
}

/// Error writing to the virtual device.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("device write failed: {0}")]
    Write(#[from] std::io::Error),
    #[error("device is closed")]
    Closed,
}

/// Destination for event groups: the virtual keyboard, or a recorder in tests.
#[cfg_attr(test, mockall::automock)]
pub trait EventSink {
    /// Writes one key-state record and its synchronization barrier.
    ///
    /// `records` is always `[EventRecord::Key { .. }, EventRecord::SyncReport]`.
    fn write_group(&mut self, records: &[EventRecord]) -> Result<(), DeviceError>;
}

/// Result of one [`emit_tap`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TapReport {
    /// Groups the sink accepted.
    pub written: usize,
    /// Groups the sink rejected.
    pub failed: usize,
}

impl TapReport {
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// The ordered key transitions making up one tap of `mapping`.
///
/// Two transitions without shift, four with.
pub fn tap_sequence(mapping: KeyMapping) -> Vec<(KeyCode, KeyState)> {
    let key = mapping.device_key;
    let mut steps = Vec::with_capacity(4);
    if mapping.shift_required {
        steps.push((KeyCode::LeftShift, KeyState::Pressed));
    }
    steps.push((key, KeyState::Pressed));
    steps.push((key, KeyState::Released));
    if mapping.shift_required {
        steps.push((KeyCode::LeftShift, KeyState::Released));
    }
    steps
}

/// Writes one complete tap of `mapping` to `sink`.
///
/// Each press or release is written as its own group; a failure is logged and
/// does not stop the remaining groups.
pub fn emit_tap<S: EventSink + ?Sized>(sink: &mut S, mapping: KeyMapping) -> TapReport {
    let mut report = TapReport::default();
    for (key, state) in tap_sequence(mapping) {
        let group = [EventRecord::Key { key, state }, EventRecord::SyncReport];
        match sink.write_group(&group) {
            Ok(()) => report.written += 1,
            Err(e) => {
                warn!("simulate key error ({key} {state:?}): {e}");
                report.failed += 1;
            }
        }
    }
    report
}
