//! Identity and capabilities of the virtual keyboard.

use std::collections::BTreeSet;

use crate::keymap::{KeyCode, KeyMap};

/// `BUS_USB` from `linux/input.h`.
pub const BUS_USB: u16 = 0x03;

/// Name the virtual keyboard registers under.
pub const DEFAULT_DEVICE_NAME: &str = "keyrelay virtual keyboard";

/// The `input_id` tuple reported for the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub bus: u16,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        Self {
            bus: BUS_USB,
            vendor: 0x1234,
            product: 0xfedc,
            version: 1,
        }
    }
}

/// Everything the device registration step needs.
///
/// `EV_SYN` and `EV_KEY` are implied: a keyboard that declares key bits
/// supports both event classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSpec {
    pub name: String,
    pub identity: DeviceIdentity,
    /// Key codes to enable on the device.
    pub keys: BTreeSet<KeyCode>,
}

impl DeviceSpec {
    /// Spec for a keyboard able to emit every key in `keymap` plus shift.
    pub fn keyboard(keymap: &KeyMap) -> Self {
        Self {
            name: DEFAULT_DEVICE_NAME.to_string(),
            identity: DeviceIdentity::default(),
            keys: keymap.capabilities(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_spec_declares_shift_and_table_keys() {
        // Arrange
        let keymap = KeyMap::new();

        // Act
        let spec = DeviceSpec::keyboard(&keymap);

        // Assert
        assert!(spec.keys.contains(&KeyCode::LeftShift));
        assert!(spec.keys.contains(&KeyCode::A));
        assert!(spec.keys.contains(&KeyCode::Up));
        assert_eq!(spec.keys, keymap.capabilities());
    }

    #[test]
    fn test_default_identity_is_usb() {
        let id = DeviceIdentity::default();

        assert_eq!(id.bus, BUS_USB);
        assert_eq!((id.vendor, id.product, id.version), (0x1234, 0xfedc, 1));
    }

    #[test]
    fn test_with_name_overrides_default() {
        let spec = DeviceSpec::keyboard(&KeyMap::new()).with_name("test kbd");

        assert_eq!(spec.name, "test kbd");
    }
}
