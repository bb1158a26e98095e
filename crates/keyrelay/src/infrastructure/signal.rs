//! SIGINT/SIGTERM handling.
//!
//! The handler stores `true` into a static flag and writes one byte to a
//! non-blocking wake pipe.  It is installed without `SA_RESTART`, so a blocked
//! terminal read fails with `EINTR`.  [`RawStdin`] also polls the pipe's read
//! end next to stdin, which covers a signal that lands after the run loop
//! checked the flag but before it started waiting: the pipe is already
//! readable and the wait returns at once.  Cleanup always runs on the main
//! thread.
//!
//! [`RawStdin`]: crate::infrastructure::terminal::stdin::RawStdin

use std::ffi::c_int;
use std::io;
use std::os::fd::{FromRawFd, IntoRawFd, OwnedFd, RawFd};
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Mutex, PoisonError};

use nix::errno::Errno;
use nix::fcntl::OFlag;
use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};
use thiserror::Error;
use tracing::debug;

use crate::application::shutdown::ShutdownFlag;

static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Write end of the wake pipe, or -1 before installation.
static WAKE_WRITE_FD: AtomicI32 = AtomicI32::new(-1);

/// Read end of the wake pipe; every installation hands out a duplicate.
static WAKE_READ: Mutex<Option<OwnedFd>> = Mutex::new(None);

const SHUTDOWN_SIGNALS: [Signal; 2] = [Signal::SIGINT, Signal::SIGTERM];

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("cannot create wake pipe: {0}")]
    WakePipe(#[source] io::Error),
    #[error("cannot install {signal} handler: {source}")]
    Install {
        signal: Signal,
        #[source]
        source: Errno,
    },
}

/// What [`install_shutdown_handler`] hands back.
#[derive(Debug)]
pub struct ShutdownSignals {
    /// Set by the handler.
    pub flag: ShutdownFlag,
    /// Becomes readable once a shutdown signal has arrived.
    pub wake: OwnedFd,
}

extern "C" fn request_shutdown(_signal: c_int) {
    SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
    let fd = WAKE_WRITE_FD.load(Ordering::SeqCst);
    if fd >= 0 {
        // A full pipe is already readable.
        let _ = nix::unistd::write(fd, &[1]);
    }
}

/// Creates a non-blocking, close-on-exec pipe as `(read, write)`.
pub(crate) fn wake_pipe() -> Result<(OwnedFd, OwnedFd), Errno> {
    let (read, write): (RawFd, RawFd) =
        nix::unistd::pipe2(OFlag::O_NONBLOCK | OFlag::O_CLOEXEC)?;
    // SAFETY: both descriptors were just returned by pipe2 and are owned by
    // nothing else.
    Ok(unsafe { (OwnedFd::from_raw_fd(read), OwnedFd::from_raw_fd(write)) })
}

/// Returns a duplicate of the wake pipe's read end, creating the pipe on first
/// use.  The write end stays open for the life of the process.
fn wake_read_end() -> io::Result<OwnedFd> {
    let mut slot = WAKE_READ.lock().unwrap_or_else(PoisonError::into_inner);
    let read = match slot.take() {
        Some(read) => read,
        None => {
            let (read, write) = wake_pipe().map_err(io::Error::from)?;
            WAKE_WRITE_FD.store(write.into_raw_fd(), Ordering::SeqCst);
            read
        }
    };
    let duplicate = read.try_clone();
    *slot = Some(read);
    duplicate
}

/// Installs the shutdown handler for SIGINT and SIGTERM.
///
/// Installing again is harmless; all installations share one flag and one
/// wake pipe.
pub fn install_shutdown_handler() -> Result<ShutdownSignals, SignalError> {
    let wake = wake_read_end().map_err(SignalError::WakePipe)?;

    let action = SigAction::new(
        SigHandler::Handler(request_shutdown),
        SaFlags::empty(),
        SigSet::empty(),
    );

    for signal in SHUTDOWN_SIGNALS {
        // SAFETY: the handler performs an atomic store, an atomic load and a
        // write(2), all async-signal-safe, and touches no other state.
        unsafe { signal::sigaction(signal, &action) }
            .map_err(|source| SignalError::Install { signal, source })?;
        debug!("{signal} handler installed");
    }

    Ok(ShutdownSignals {
        flag: ShutdownFlag::new(&SHUTDOWN_REQUESTED),
        wake,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::poll::{poll, PollFd, PollFlags};

    /// Reads back the action installed for `signal`.
    ///
    /// sigaction only reports the old action while setting a new one, so the
    /// shutdown handler is set in the meantime and the old action put back.
    fn installed_action(signal: Signal) -> SigAction {
        let placeholder = SigAction::new(
            SigHandler::Handler(request_shutdown),
            SaFlags::empty(),
            SigSet::empty(),
        );
        // SAFETY: the placeholder is the shutdown handler itself and the
        // previous action is reinstalled immediately.
        unsafe {
            let current = signal::sigaction(signal, &placeholder).unwrap();
            signal::sigaction(signal, &current).unwrap();
            current
        }
    }

    #[test]
    fn test_handlers_are_installed_without_sa_restart() {
        // Arrange
        install_shutdown_handler().unwrap();

        for signal in SHUTDOWN_SIGNALS {
            // Act
            let action = installed_action(signal);

            // Assert
            assert!(
                !action.flags().contains(SaFlags::SA_RESTART),
                "{signal} must interrupt blocking reads"
            );
            assert!(matches!(action.handler(), SigHandler::Handler(_)));
        }
    }

    #[test]
    fn test_raised_sigint_sets_flag_and_wakes_pipe() {
        // Arrange
        let signals = install_shutdown_handler().unwrap();
        SHUTDOWN_REQUESTED.store(false, Ordering::SeqCst);

        // Act
        signal::raise(Signal::SIGINT).unwrap();

        // Assert
        assert!(signals.flag.is_requested());
        let mut fds = [PollFd::new(&signals.wake, PollFlags::POLLIN)];
        assert_eq!(poll(&mut fds, 0).unwrap(), 1);
    }
}
