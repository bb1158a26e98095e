//! Unbuffered reader over file descriptor 0.

use std::io::{self, Read};
use std::os::fd::OwnedFd;

use nix::errno::Errno;
use nix::libc::STDIN_FILENO;
use nix::poll::{poll, PollFd, PollFlags};

/// Reads stdin with one `read(2)` per call.
///
/// Unlike `std::io::Stdin` there is no buffer in between, so nothing typed is
/// held back from the decoder, and a read interrupted by a signal is returned
/// as [`io::ErrorKind::Interrupted`] instead of being retried.
///
/// With a wake descriptor, each read first waits on stdin and the wake
/// descriptor together; once the wake descriptor is readable every read
/// reports `Interrupted` without touching stdin.
#[derive(Debug)]
pub struct RawStdin {
    wake: Option<OwnedFd>,
}

impl RawStdin {
    /// `wake` is the read end of the shutdown wake pipe, if there is one.
    pub fn new(wake: Option<OwnedFd>) -> Self {
        Self { wake }
    }

    /// Blocks until stdin or `wake` is ready; `true` means woken.
    fn wait(wake: &OwnedFd) -> io::Result<bool> {
        let stdin = io::stdin();
        let mut fds = [
            PollFd::new(&stdin, PollFlags::POLLIN),
            PollFd::new(wake, PollFlags::POLLIN),
        ];
        match poll(&mut fds, -1) {
            Ok(_) => Ok(fds[1]
                .revents()
                .is_some_and(|revents| revents.contains(PollFlags::POLLIN))),
            Err(Errno::EINTR) => Ok(true),
            Err(e) => Err(io::Error::from(e)),
        }
    }
}

impl Read for RawStdin {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(wake) = &self.wake {
            if Self::wait(wake)? {
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
        }

        match nix::unistd::read(STDIN_FILENO, buf) {
            Ok(n) => Ok(n),
            Err(Errno::EINTR) => Err(io::Error::from(io::ErrorKind::Interrupted)),
            Err(e) => Err(io::Error::from(e)),
        }
    }
}
