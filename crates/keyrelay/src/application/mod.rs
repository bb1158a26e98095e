//! Application layer of the relay.
//!
//! - **`relay_session`** – [`relay_session::RelaySession`], which owns the
//!   virtual keyboard and the terminal mode and runs the read/translate/tap
//!   loop.  Also defines the [`relay_session::VirtualKeyboard`] and
//!   [`relay_session::TerminalMode`] traits the infrastructure layer
//!   implements.
//!
//! - **`shutdown`** – the flag an interrupt handler sets to end the loop.
//!
//! - **`config`** – compiled-in session settings (device name and identity,
//!   settle delay).

pub mod config;
pub mod relay_session;
pub mod shutdown;
