//! Infrastructure layer: OS-facing adapters for the relay.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `keyrelay_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`virtual_keyboard`** – `UinputKeyboard`, the `/dev/uinput` implementation
//!   of `VirtualKeyboard`, plus `MockVirtualKeyboard` for tests.
//!
//! - **`terminal`** – `TtyMode` (termios raw mode), `RawStdin` (unbuffered
//!   reads that wait on stdin and the wake pipe together), and `MockTerminal`
//!   for tests.
//!
//! - **`signal`** – installs the SIGINT/SIGTERM handler that sets the shutdown
//!   flag and writes to the wake pipe.
//!
//! The Linux-only adapters are selected at compile time with
//! `#[cfg(target_os = "linux")]`; the mocks build everywhere.

#[cfg(target_os = "linux")]
pub mod signal;
pub mod terminal;
pub mod virtual_keyboard;
