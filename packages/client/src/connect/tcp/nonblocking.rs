//! Connect with timeout
//!
//! Issues a non-blocking `connect`, restores blocking mode right away, then
//! waits for writability and reads `SO_ERROR` to learn the outcome.

use std::io;
use std::net::{SocketAddr, TcpStream};
use std::os::fd::AsRawFd;
use std::time::Duration;

use socket2::{Domain, Protocol, SockAddr, Socket, Type};

use super::readiness::{Interest, wait_ready};
use crate::error::{Error, ErrorCode, Result};

/// Open a stream socket to `addr`, bounded by `timeout` (`None` = no limit).
///
/// An elapsed timeout is reported as [`ErrorCode::HitConnectTimeout`], any
/// other failure as a system error.
pub fn connect_with_timeout(addr: SocketAddr, timeout: Option<Duration>) -> Result<TcpStream> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))
        .map_err(|e| Error::system(&e))?;

    socket.set_nonblocking(true).map_err(|e| Error::system(&e))?;

    match socket.connect(&SockAddr::from(addr)) {
        Ok(()) => {}
        Err(e) if connect_pending(&e) => {}
        Err(e) => {
            tracing::debug!("connect to {addr} failed immediately: {e}");
            return Err(Error::system(&e));
        }
    }

    socket.set_nonblocking(false).map_err(|e| Error::system(&e))?;

    let ready = wait_ready(socket.as_raw_fd(), Interest::Writable, timeout)
        .map_err(|e| Error::system(&e))?;
    if !ready {
        tracing::debug!("connect to {addr} timed out after {timeout:?}");
        return Err(Error::own(ErrorCode::HitConnectTimeout));
    }

    match socket.take_error() {
        Ok(None) => {}
        Ok(Some(pending)) => {
            tracing::debug!("connect to {addr} failed: {pending}");
            return Err(Error::system(&pending));
        }
        Err(e) => return Err(Error::system(&e)),
    }

    tracing::trace!("connected to {addr}");
    Ok(TcpStream::from(socket))
}

fn connect_pending(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock || err.raw_os_error() == Some(libc::EINPROGRESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn connects_to_listening_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");
        let stream = connect_with_timeout(addr, Some(Duration::from_secs(5)))
            .expect("connect should succeed");
        assert_eq!(stream.peer_addr().expect("peer addr"), addr);
    }

    #[test]
    fn refused_connect_is_system_error() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
            listener.local_addr().expect("local addr")
        };
        let err = connect_with_timeout(addr, Some(Duration::from_secs(5)))
            .expect_err("nothing listens on a closed port");
        assert!(err.is_system());
        assert_eq!(err.code(), libc::ECONNREFUSED);
    }
}
