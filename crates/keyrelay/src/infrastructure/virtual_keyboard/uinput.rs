//! Linux virtual keyboard backed by `/dev/uinput`.
//!
//! # How uinput registration works
//!
//! Opening `/dev/uinput` gives a handle to a not-yet-existing input device.
//! Before the kernel will create it, the handle must be told:
//!
//! 1. which event classes it produces (`UI_SET_EVBIT`; here `EV_KEY`, with
//!    `EV_SYN` implied by the input core),
//! 2. which key codes it can report (`UI_SET_KEYBIT`, once per key), and
//! 3. its name and `input_id` (`UI_DEV_SETUP`).
//!
//! `UI_DEV_CREATE` then registers the device, after which udev creates an
//! `/dev/input/eventN` node for it and compositors start listening.  The
//! `evdev` builder performs these ioctls in order.
//!
//! Closing the handle unregisters the device again.
//!
//! # Permissions
//!
//! The process needs write access to `/dev/uinput`, normally via root or a
//! udev rule granting the `input` group access.

use std::io;

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{AttributeSet, BusType, EventType, InputEvent, InputId, Key};
use keyrelay_core::{DeviceError, DeviceSpec, EventRecord, EventSink};
use thiserror::Error;
use tracing::{debug, info};

use crate::application::relay_session::VirtualKeyboard;

/// Error creating the virtual keyboard.
#[derive(Debug, Error)]
pub enum UinputError {
    #[error("cannot open /dev/uinput: {0}")]
    Open(#[source] io::Error),
    #[error("cannot declare key capabilities: {0}")]
    Capabilities(#[source] io::Error),
    #[error("cannot register virtual device: {0}")]
    Register(#[source] io::Error),
}

/// A registered uinput keyboard.
///
/// The device is held in an `Option` so [`VirtualKeyboard::close`] can drop
/// it in place; writes after that fail with [`DeviceError::Closed`].
pub struct UinputKeyboard {
    device: Option<VirtualDevice>,
    name: String,
}

impl UinputKeyboard {
    /// Opens `/dev/uinput`, declares every key in `spec` and registers the
    /// device.
    ///
    /// # Errors
    ///
    /// Returns the [`UinputError`] variant for the step that failed.
    pub fn create(spec: &DeviceSpec) -> Result<Self, UinputError> {
        let mut keys = AttributeSet::<Key>::new();
        for key in &spec.keys {
            keys.insert(Key::new(key.code()));
        }

        let identity = spec.identity;
        let device = VirtualDeviceBuilder::new()
            .map_err(UinputError::Open)?
            .name(&spec.name)
            .input_id(InputId::new(
                BusType(identity.bus),
                identity.vendor,
                identity.product,
                identity.version,
            ))
            .with_keys(&keys)
            .map_err(UinputError::Capabilities)?
            .build()
            .map_err(UinputError::Register)?;

        info!(
            "virtual keyboard \"{}\" registered ({} keys, vendor {:#06x}, product {:#06x})",
            spec.name,
            spec.keys.len(),
            identity.vendor,
            identity.product
        );

        Ok(Self {
            device: Some(device),
            name: spec.name.clone(),
        })
    }
}

/// Converts a record into the event `evdev` writes.
fn to_input_event(record: EventRecord) -> InputEvent {
    let (ty, code, value) = record.raw();
    InputEvent::new(EventType(ty), code, value)
}

/// Events to pass to `VirtualDevice::emit` for one group.
///
/// `emit` terminates every batch with its own SYN_REPORT, so the group's
/// barrier record is left out here; otherwise each group would carry two.
fn group_events(records: &[EventRecord]) -> Vec<InputEvent> {
    records
        .iter()
        .filter(|record| !matches!(record, EventRecord::SyncReport))
        .map(|&record| to_input_event(record))
        .collect()
}

impl EventSink for UinputKeyboard {
    fn write_group(&mut self, records: &[EventRecord]) -> Result<(), DeviceError> {
        let device = self.device.as_mut().ok_or(DeviceError::Closed)?;
        device.emit(&group_events(records))?;
        Ok(())
    }
}

impl VirtualKeyboard for UinputKeyboard {
    fn close(&mut self) {
        if self.device.take().is_some() {
            debug!("virtual keyboard \"{}\" unregistered", self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyrelay_core::{KeyCode, KeyState};

    #[test]
    fn test_key_record_converts_to_ev_key_event() {
        let event = to_input_event(EventRecord::Key {
            key: KeyCode::A,
            state: KeyState::Pressed,
        });

        assert_eq!(event.event_type(), EventType::KEY);
        assert_eq!(event.code(), 30);
        assert_eq!(event.value(), 1);
    }

    #[test]
    fn test_key_group_becomes_a_single_key_event() {
        // Arrange
        let group = [
            EventRecord::Key {
                key: KeyCode::LeftShift,
                state: KeyState::Released,
            },
            EventRecord::SyncReport,
        ];

        // Act
        let events = group_events(&group);

        // Assert
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), EventType::KEY);
        assert_eq!(events[0].code(), 42);
        assert_eq!(events[0].value(), 0);
    }

    #[test]
    fn test_sync_record_converts_to_syn_report() {
        let event = to_input_event(EventRecord::SyncReport);

        assert_eq!(event.event_type(), EventType::SYNCHRONIZATION);
        assert_eq!(event.code(), 0);
        assert_eq!(event.value(), 0);
    }
}
