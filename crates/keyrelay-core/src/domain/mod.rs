//! Domain values shared by the relay and its device adapters.
//!
//! Nothing here touches the OS; the infrastructure layer turns a
//! [`device::DeviceSpec`] into an actual uinput registration.

pub mod device;
