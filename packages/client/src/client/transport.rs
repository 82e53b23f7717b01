//! Timeout-aware I/O engine
//!
//! One loop serves both directions: wait for readiness, move at most one
//! chunk through TLS or the raw socket, repeat until the request is done,
//! the peer shuts down, or (receive only) a transfer comes up short.

use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::ops::Range;
use std::os::fd::AsRawFd;
use std::time::Duration;

use crate::connect::tcp::{Interest, apply_read_timeout, apply_write_timeout, is_readable, wait_ready};
use crate::error::constructors::io_failure;
use crate::error::{Error, ErrorCode, Result};
use crate::proxy::HandshakeIo;

/// Transfer direction of one engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Send,
    Recv,
}

impl Direction {
    fn timeout_code(self) -> ErrorCode {
        match self {
            Direction::Send => ErrorCode::HitWriteTimeout,
            Direction::Recv => ErrorCode::HitReadTimeout,
        }
    }

    fn interest(self) -> Interest {
        match self {
            Direction::Send => Interest::Writable,
            Direction::Recv => Interest::Readable,
        }
    }
}

enum Buffer<'a> {
    Send(&'a [u8]),
    Recv(&'a mut [u8]),
}

impl Buffer<'_> {
    fn direction(&self) -> Direction {
        match self {
            Buffer::Send(_) => Direction::Send,
            Buffer::Recv(_) => Direction::Recv,
        }
    }

    fn len(&self) -> usize {
        match self {
            Buffer::Send(b) => b.len(),
            Buffer::Recv(b) => b.len(),
        }
    }
}

/// The socket, its optional TLS session and the per-operation timeout.
#[derive(Default)]
pub struct Transport {
    stream: Option<TcpStream>,
    #[cfg(feature = "__rustls")]
    tls: Option<rustls::ClientConnection>,
    timeout: Option<Duration>,
}

impl Transport {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            stream: None,
            #[cfg(feature = "__rustls")]
            tls: None,
            timeout: timeout.filter(|t| !t.is_zero()),
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Takes effect on the next blocking operation.
    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout.filter(|t| !t.is_zero());
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    #[must_use]
    pub fn is_tls(&self) -> bool {
        #[cfg(feature = "__rustls")]
        {
            self.tls.is_some()
        }
        #[cfg(not(feature = "__rustls"))]
        {
            false
        }
    }

    #[must_use]
    pub fn stream(&self) -> Option<&TcpStream> {
        self.stream.as_ref()
    }

    pub fn peer_addr(&self) -> Result<SocketAddr> {
        self.connected_stream()?
            .peer_addr()
            .map_err(|e| Error::system(&e))
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.connected_stream()?
            .local_addr()
            .map_err(|e| Error::system(&e))
    }

    /// Adopt a freshly connected socket.
    pub(crate) fn attach(&mut self, stream: TcpStream) {
        self.close();
        self.stream = Some(stream);
    }

    /// Run the TLS client handshake over the attached socket.
    #[cfg(feature = "__rustls")]
    pub(crate) fn start_tls(
        &mut self,
        config: std::sync::Arc<rustls::ClientConfig>,
        host: &str,
    ) -> Result<()> {
        let timeout = self.timeout;
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| Error::own(ErrorCode::NoSocket))?;
        apply_read_timeout(stream, timeout)?;
        apply_write_timeout(stream, timeout)?;
        let conn = crate::tls::handshake(stream, config, host)?;
        self.tls = Some(conn);
        Ok(())
    }

    /// Shut TLS down, then close the socket. Harmless when already closed.
    pub fn close(&mut self) {
        #[cfg(feature = "__rustls")]
        if let Some(mut conn) = self.tls.take() {
            if let Some(stream) = self.stream.as_mut() {
                crate::tls::session::shutdown(&mut conn, stream);
            }
        }
        if let Some(stream) = self.stream.take() {
            if let Err(e) = stream.shutdown(Shutdown::Both) {
                tracing::trace!("socket shutdown: {e}");
            }
            tracing::debug!("connection closed");
        }
    }

    /// Send `buf`, at most `chunk` bytes per attempt (`0` = all at once).
    ///
    /// On failure the error reports how many bytes went out first.
    pub fn send(&mut self, buf: &[u8], chunk: usize) -> Result<usize> {
        self.operate(Buffer::Send(buf), chunk)
    }

    /// Receive into `buf`, at most `chunk` bytes per attempt (`0` = all).
    ///
    /// Returns early, successfully, on peer shutdown or when one attempt
    /// yields less than it asked for. Pass `chunk` to keep iterating
    /// towards an exact count.
    pub fn recv(&mut self, buf: &mut [u8], chunk: usize) -> Result<usize> {
        if buf.is_empty() {
            return Err(Error::own(ErrorCode::Null));
        }
        self.operate(Buffer::Recv(buf), chunk)
    }

    /// Non-blocking check for readable data.
    ///
    /// With TLS, pending records are pulled into the session and only
    /// decrypted application data (or a close) counts. A failed session is
    /// reported as its TLS error.
    pub fn peek(&mut self) -> Result<bool> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| Error::own(ErrorCode::NoSocket))?;
        let fd = stream.as_raw_fd();

        #[cfg(feature = "__rustls")]
        if let Some(conn) = self.tls.as_mut() {
            if buffered_plaintext(conn)? {
                return Ok(true);
            }
            if !is_readable(fd).map_err(|e| Error::system(&e))? {
                return Ok(false);
            }
            match conn.read_tls(stream) {
                Ok(0) => return Ok(true),
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(false),
                Err(e) => return Err(Error::system(&e)),
            }
            let state = conn.process_new_packets().map_err(|e| Error::tls(&e))?;
            return Ok(state.plaintext_bytes_to_read() > 0 || state.peer_has_closed());
        }

        is_readable(fd).map_err(|e| Error::system(&e))
    }

    fn connected_stream(&self) -> Result<&TcpStream> {
        self.stream
            .as_ref()
            .ok_or_else(|| Error::own(ErrorCode::NoSocket))
    }

    fn operate(&mut self, mut buf: Buffer<'_>, chunk: usize) -> Result<usize> {
        let direction = buf.direction();
        let total = buf.len();
        let timeout = self.timeout;

        let stream = self.connected_stream()?;
        let fd = stream.as_raw_fd();
        match direction {
            Direction::Send => apply_write_timeout(stream, timeout)?,
            Direction::Recv => apply_read_timeout(stream, timeout)?,
        }

        let mut done = 0;
        while done < total {
            if !self.has_buffered_plaintext(direction) {
                let ready = wait_ready(fd, direction.interest(), timeout)
                    .map_err(|e| Error::system(&e).with_transferred(done))?;
                if !ready {
                    tracing::debug!("{direction:?} timed out after {timeout:?} ({done}/{total} bytes)");
                    return Err(Error::own(direction.timeout_code()).with_transferred(done));
                }
            }

            let wanted = if chunk > 0 && chunk < total - done {
                chunk
            } else {
                total - done
            };

            let n = match self.transfer_once(&mut buf, done..done + wanted) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(io_failure(&e, direction.timeout_code()).with_transferred(done));
                }
            };

            if n == 0 {
                tracing::trace!("peer shut down after {done} bytes");
                break;
            }
            done += n;
            if direction == Direction::Recv && n < wanted {
                break;
            }
        }
        Ok(done)
    }

    fn transfer_once(&mut self, buf: &mut Buffer<'_>, range: Range<usize>) -> io::Result<usize> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(io::ErrorKind::NotConnected.into());
        };

        #[cfg(feature = "__rustls")]
        if let Some(conn) = self.tls.as_mut() {
            let mut tls = rustls::Stream::new(conn, stream);
            return match buf {
                Buffer::Send(b) => {
                    let n = tls.write(&b[range])?;
                    tls.flush()?;
                    Ok(n)
                }
                Buffer::Recv(b) => match tls.read(&mut b[range]) {
                    Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(0),
                    other => other,
                },
            };
        }

        match buf {
            Buffer::Send(b) => stream.write(&b[range]),
            Buffer::Recv(b) => stream.read(&mut b[range]),
        }
    }

    /// A failed session reports nothing buffered; the read that follows
    /// surfaces its error.
    #[cfg_attr(not(feature = "__rustls"), allow(unused_variables))]
    fn has_buffered_plaintext(&mut self, direction: Direction) -> bool {
        #[cfg(feature = "__rustls")]
        if direction == Direction::Recv {
            if let Some(conn) = self.tls.as_mut() {
                return buffered_plaintext(conn).unwrap_or(false);
            }
        }
        false
    }
}

#[cfg(feature = "__rustls")]
fn buffered_plaintext(conn: &mut rustls::ClientConnection) -> Result<bool> {
    conn.process_new_packets()
        .map(|state| state.plaintext_bytes_to_read() > 0)
        .map_err(|e| Error::tls(&e))
}

impl HandshakeIo for Transport {
    fn send(&mut self, buf: &[u8], chunk: usize) -> Result<usize> {
        Transport::send(self, buf, chunk)
    }

    fn recv(&mut self, buf: &mut [u8], chunk: usize) -> Result<usize> {
        Transport::recv(self, buf, chunk)
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        self.close();
    }
}
