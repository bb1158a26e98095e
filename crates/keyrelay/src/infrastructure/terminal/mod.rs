//! Controlling-terminal adapters: raw-mode control and the unbuffered stdin
//! reader the decoder consumes.

pub mod mock;

#[cfg(target_os = "linux")]
pub mod stdin;

#[cfg(target_os = "linux")]
pub mod tty;
