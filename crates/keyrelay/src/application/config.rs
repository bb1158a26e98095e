//! Compiled-in session settings.
//!
//! keyrelay takes no flags, no config file and no environment variables (other
//! than `RUST_LOG` for log verbosity).  The few knobs the session has are
//! grouped here with their defaults so tests can shorten the settle delay.

use std::time::Duration;

use keyrelay_core::{domain::device::DEFAULT_DEVICE_NAME, DeviceIdentity, DeviceSpec, KeyMap};

/// Default wait between device registration and the first keystroke.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Settings for one relay session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Name the virtual keyboard registers under.
    pub device_name: String,
    /// `input_id` reported for the virtual keyboard.
    pub identity: DeviceIdentity,
    /// How long to wait after registration before reading input.
    ///
    /// Other consumers (udev, the compositor) need a moment to pick up a new
    /// input device; events written before that are lost.
    pub settle_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            identity: DeviceIdentity::default(),
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

impl SessionConfig {
    /// Device registration spec for `keymap` under these settings.
    pub fn device_spec(&self, keymap: &KeyMap) -> DeviceSpec {
        let mut spec = DeviceSpec::keyboard(keymap).with_name(self.device_name.clone());
        spec.identity = self.identity;
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyrelay_core::KeyCode;

    #[test]
    fn test_default_settle_delay_is_one_second() {
        assert_eq!(SessionConfig::default().settle_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_device_spec_uses_configured_name_and_identity() {
        // Arrange
        let config = SessionConfig {
            device_name: "kbd under test".into(),
            identity: DeviceIdentity {
                bus: 0x06,
                vendor: 1,
                product: 2,
                version: 3,
            },
            settle_delay: Duration::ZERO,
        };

        // Act
        let spec = config.device_spec(&KeyMap::new());

        // Assert
        assert_eq!(spec.name, "kbd under test");
        assert_eq!(spec.identity, config.identity);
        assert!(spec.keys.contains(&KeyCode::LeftShift));
    }
}
