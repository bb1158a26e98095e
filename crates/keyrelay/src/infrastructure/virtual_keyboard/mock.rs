//! Mock virtual keyboard for tests.
//!
//! The real keyboard needs write access to `/dev/uinput` and injects keys into
//! the running session.  `MockVirtualKeyboard` records every group instead, so
//! tests can assert exactly what would have reached the kernel and in what
//! order.
//!
//! A [`RelaySession`](crate::application::relay_session::RelaySession) takes
//! its keyboard by value, so the recorded state sits behind `Arc`s: clone the
//! mock before handing it over and inspect the clone afterwards.
//!
//! ```ignore
//! let keyboard = MockVirtualKeyboard::new();
//! let view = keyboard.clone();
//! let session = RelaySession::start(KeyMap::new(), keyboard, terminal, &config)?;
//! session.shutdown();
//! assert_eq!(view.close_count(), 1);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use keyrelay_core::{DeviceError, EventRecord, EventSink, KeyCode, KeyState};

use crate::application::relay_session::VirtualKeyboard;

/// A virtual keyboard that records groups in memory.
#[derive(Debug, Clone, Default)]
pub struct MockVirtualKeyboard {
    /// Every record of every accepted group, in write order.
    pub records: Arc<Mutex<Vec<EventRecord>>>,
    /// Number of groups accepted.
    pub groups: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
    closed: bool,
    /// When `true`, every write fails with a simulated I/O error.
    pub should_fail: bool,
}

impl MockVirtualKeyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A keyboard whose writes all fail.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// How many times `close` actually closed the device.
    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    /// Key transitions recorded so far, sync barriers omitted.
    pub fn transitions(&self) -> Vec<(KeyCode, KeyState)> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter_map(|record| match *record {
                EventRecord::Key { key, state } => Some((key, state)),
                EventRecord::SyncReport => None,
            })
            .collect()
    }
}

impl EventSink for MockVirtualKeyboard {
    fn write_group(&mut self, records: &[EventRecord]) -> Result<(), DeviceError> {
        if self.closed {
            return Err(DeviceError::Closed);
        }
        if self.should_fail {
            return Err(DeviceError::Write(std::io::Error::other("mock failure")));
        }
        self.records.lock().unwrap().extend_from_slice(records);
        self.groups.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl VirtualKeyboard for MockVirtualKeyboard {
    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_groups_in_order() {
        // Arrange
        let mut keyboard = MockVirtualKeyboard::new();
        let press = EventRecord::Key {
            key: KeyCode::A,
            state: KeyState::Pressed,
        };

        // Act
        keyboard
            .write_group(&[press, EventRecord::SyncReport])
            .unwrap();

        // Assert
        assert_eq!(
            *keyboard.records.lock().unwrap(),
            vec![press, EventRecord::SyncReport]
        );
        assert_eq!(keyboard.groups.load(Ordering::SeqCst), 1);
        assert_eq!(keyboard.transitions(), vec![(KeyCode::A, KeyState::Pressed)]);
    }

    #[test]
    fn test_write_after_close_is_rejected() {
        let mut keyboard = MockVirtualKeyboard::new();
        keyboard.close();

        let result = keyboard.write_group(&[EventRecord::SyncReport]);

        assert!(matches!(result, Err(DeviceError::Closed)));
    }

    #[test]
    fn test_close_counts_once_and_is_shared_by_clones() {
        let mut keyboard = MockVirtualKeyboard::new();
        let view = keyboard.clone();

        keyboard.close();
        keyboard.close();

        assert_eq!(view.close_count(), 1);
    }

    #[test]
    fn test_failing_keyboard_rejects_writes() {
        let mut keyboard = MockVirtualKeyboard::failing();

        let result = keyboard.write_group(&[EventRecord::SyncReport]);

        assert!(matches!(result, Err(DeviceError::Write(_))));
        assert!(keyboard.records.lock().unwrap().is_empty());
    }
}
