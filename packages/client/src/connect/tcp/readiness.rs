//! Socket readiness notification
//!
//! Blocks on `poll(2)` until a descriptor is ready for the requested
//! direction or the timeout elapses.

use std::io;
use std::os::fd::RawFd;
use std::time::Duration;

/// Direction a readiness wait is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interest {
    Readable,
    Writable,
}

impl Interest {
    fn events(self) -> libc::c_short {
        match self {
            Interest::Readable => libc::POLLIN,
            Interest::Writable => libc::POLLOUT,
        }
    }
}

/// Wait until `fd` is ready for `interest`.
///
/// Returns `Ok(false)` when the timeout elapsed first. `None` waits
/// indefinitely. Error and hang-up conditions count as ready so the
/// following operation can surface them.
pub fn wait_ready(fd: RawFd, interest: Interest, timeout: Option<Duration>) -> io::Result<bool> {
    let timeout_ms = poll_timeout(timeout);
    let mut pfd = libc::pollfd {
        fd,
        events: interest.events(),
        revents: 0,
    };

    loop {
        // SAFETY: pfd is a single valid pollfd for the duration of the call.
        let ret = unsafe { libc::poll(&mut pfd, 1, timeout_ms) };
        match ret {
            0 => return Ok(false),
            n if n > 0 => return Ok(true),
            _ => {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                return Err(err);
            }
        }
    }
}

/// Zero-timeout readability check.
pub fn is_readable(fd: RawFd) -> io::Result<bool> {
    wait_ready(fd, Interest::Readable, Some(Duration::ZERO))
}

fn poll_timeout(timeout: Option<Duration>) -> libc::c_int {
    match timeout {
        None => -1,
        Some(t) => {
            // Round up so a sub-millisecond timeout still waits.
            let ms = t.as_millis() + u128::from(t.subsec_nanos() % 1_000_000 != 0);
            libc::c_int::try_from(ms).unwrap_or(libc::c_int::MAX)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::{TcpListener, TcpStream};
    use std::os::fd::AsRawFd;

    #[test]
    fn poll_timeout_conversion() {
        assert_eq!(poll_timeout(None), -1);
        assert_eq!(poll_timeout(Some(Duration::ZERO)), 0);
        assert_eq!(poll_timeout(Some(Duration::from_millis(1500))), 1500);
        assert_eq!(poll_timeout(Some(Duration::from_micros(10))), 1);
    }

    #[test]
    fn readable_only_after_peer_writes() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let client = TcpStream::connect(listener.local_addr().expect("local addr"))
            .expect("connect loopback");
        let (mut server, _) = listener.accept().expect("accept");

        assert!(!is_readable(client.as_raw_fd()).expect("poll"));
        server.write_all(b"x").expect("write");
        assert!(
            wait_ready(client.as_raw_fd(), Interest::Readable, Some(Duration::from_secs(5)))
                .expect("poll")
        );
        assert!(
            wait_ready(client.as_raw_fd(), Interest::Writable, Some(Duration::ZERO)).expect("poll")
        );
    }
}
