//! termios raw mode for standard input.

use std::io::{self, IsTerminal};
use std::os::fd::AsFd;

use nix::sys::termios::{self, LocalFlags, SetArg, SpecialCharacterIndices, Termios};
use tracing::debug;

use crate::application::relay_session::{TerminalError, TerminalMode};

/// Raw mode for the terminal on stdin.
///
/// Only canonical line editing and echo are turned off.  `ISIG` stays on so
/// Ctrl-C still raises `SIGINT`, and `ICRNL` stays on so Enter arrives as `\n`.
/// Reads block until at least one byte is available.
#[derive(Debug, Default)]
pub struct TtyMode {
    saved: Option<Termios>,
}

impl TtyMode {
    pub fn new() -> Self {
        Self::default()
    }
}

fn raw_attributes(original: &Termios) -> Termios {
    let mut raw = original.clone();
    raw.local_flags.remove(LocalFlags::ICANON | LocalFlags::ECHO);
    raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
    raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;
    raw
}

impl TerminalMode for TtyMode {
    fn enter_raw_mode(&mut self) -> Result<(), TerminalError> {
        if self.saved.is_some() {
            return Ok(());
        }

        let stdin = io::stdin();
        if !stdin.is_terminal() {
            return Err(TerminalError::NotATerminal);
        }

        let original = termios::tcgetattr(stdin.as_fd()).map_err(io::Error::from)?;
        termios::tcsetattr(stdin.as_fd(), SetArg::TCSANOW, &raw_attributes(&original))
            .map_err(io::Error::from)?;
        self.saved = Some(original);

        debug!("stdin switched to raw mode");
        Ok(())
    }

    fn restore_mode(&mut self) -> Result<(), TerminalError> {
        let Some(original) = self.saved.take() else {
            return Ok(());
        };

        let stdin = io::stdin();
        termios::tcsetattr(stdin.as_fd(), SetArg::TCSANOW, &original).map_err(io::Error::from)?;

        debug!("stdin terminal settings restored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_without_enter_is_a_no_op() {
        let mut mode = TtyMode::new();

        assert!(mode.restore_mode().is_ok());
        assert!(mode.saved.is_none());
    }
}
