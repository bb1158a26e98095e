//! Virtual keyboard implementations.
//!
//! The uinput implementation is only built on Linux; the mock is always
//! available so integration tests can drive a session without `/dev/uinput`.

pub mod mock;

#[cfg(target_os = "linux")]
pub mod uinput;
