//! HTTP CONNECT tunnel establishment

use super::io::{HANDSHAKE_BUFFER_SIZE, HandshakeIo};
use super::types::HostInfo;
use crate::error::{Error, ErrorCode, Result};

/// Shortest reply that still holds a full status code.
pub const MIN_REPLY_LEN: usize = 12;

/// Offset of the status hundreds digit in `HTTP/1.x NNN`.
const STATUS_CLASS_OFFSET: usize = 9;

/// `CONNECT host:port HTTP/1.1` with an empty header block.
#[must_use]
pub fn connect_request(host: &str, port: u16) -> String {
    format!("CONNECT {host}:{port} HTTP/1.1\r\n\r\n")
}

/// Accept any 2xx status line.
pub fn parse_reply(reply: &[u8]) -> Result<()> {
    if reply.len() < MIN_REPLY_LEN {
        return Err(Error::own(ErrorCode::ProxyUnexpectedResponse));
    }
    if reply[STATUS_CLASS_OFFSET] != b'2' {
        return Err(Error::own(ErrorCode::TargetProxyConnectFailed));
    }
    Ok(())
}

/// Ask the proxy on `io` to open a tunnel to `target`.
pub fn negotiate(io: &mut dyn HandshakeIo, target: &HostInfo) -> Result<()> {
    let request = connect_request(target.host(), target.port());
    io.send(request.as_bytes(), request.len())?;

    let mut buf = [0u8; HANDSHAKE_BUFFER_SIZE];
    let n = io.recv(&mut buf, HANDSHAKE_BUFFER_SIZE)?;
    if let Err(e) = parse_reply(&buf[..n]) {
        let status = String::from_utf8_lossy(&buf[..n.min(32)]);
        tracing::debug!("CONNECT {target} refused: {:?}", status.lines().next());
        return Err(e);
    }

    tracing::debug!("http tunnel to {target} established");
    Ok(())
}
