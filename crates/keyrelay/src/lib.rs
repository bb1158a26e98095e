//! keyrelay library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does keyrelay do?
//!
//! keyrelay turns the terminal it runs in into a keyboard for the whole host.
//! Every key typed at the terminal is replayed as a press/release pair on a
//! virtual keyboard registered through Linux `uinput`, so the compositor and
//! every other program see it exactly like input from a physical keyboard.
//!
//! The binary:
//!
//! 1. Installs a SIGINT/SIGTERM handler that sets a shutdown flag and wakes
//!    the terminal reader.
//! 2. Registers the virtual keyboard, declaring every key the translation
//!    table can produce plus left shift.
//! 3. Waits for the new device to settle, then puts the terminal into raw
//!    mode (no line buffering, no echo) when stdin is a terminal.
//! 4. Decodes terminal bytes (including the `ESC [ A`..`ESC [ D` cursor keys),
//!    looks each symbol up, and taps the key, wrapped in shift when needed.
//! 5. On end of input or a signal, restores the terminal and unregisters the
//!    device, exactly once.

/// Application layer: the relay session, its traits and settings.
pub mod application;

/// Infrastructure layer: uinput, termios and signal adapters.
pub mod infrastructure;
