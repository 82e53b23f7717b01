//! TLS handshake over an established byte stream

use std::io;
use std::net::TcpStream;
use std::sync::Arc;

use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection};

use crate::error::constructors::io_failure;
use crate::error::{Error, ErrorCode, Result};

/// Run a client handshake for `host` on the already connected `stream`.
///
/// The stream keeps whatever socket timeouts the caller applied, so a
/// stalled server surfaces as a read or write timeout.
pub fn handshake(
    stream: &mut TcpStream,
    config: Arc<ClientConfig>,
    host: &str,
) -> Result<ClientConnection> {
    let server_name = ServerName::try_from(host.to_owned()).map_err(|e| {
        tracing::debug!("invalid TLS server name {host:?}: {e}");
        Error::own(ErrorCode::TlsGeneric)
    })?;

    let mut conn = ClientConnection::new(config, server_name).map_err(|e| {
        tracing::debug!("failed to create TLS session: {e}");
        Error::own(ErrorCode::TlsGeneric)
    })?;

    tracing::debug!("TLS handshake with {host} started");
    while conn.is_handshaking() {
        let timeout_code = if conn.wants_write() {
            ErrorCode::HitWriteTimeout
        } else {
            ErrorCode::HitReadTimeout
        };
        if let Err(e) = conn.complete_io(stream) {
            tracing::debug!("TLS handshake with {host} failed: {e}");
            return Err(match e.kind() {
                io::ErrorKind::UnexpectedEof => Error::own(ErrorCode::TlsGeneric),
                _ => io_failure(&e, timeout_code),
            });
        }
    }

    tracing::debug!(
        "TLS handshake with {host} done: {:?} {:?}",
        conn.protocol_version(),
        conn.negotiated_cipher_suite().map(|s| s.suite())
    );
    Ok(conn)
}

/// Queue `close_notify` and push it out without waiting for the peer.
pub fn shutdown(conn: &mut ClientConnection, stream: &mut TcpStream) {
    conn.send_close_notify();
    while conn.wants_write() {
        match conn.write_tls(stream) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::trace!("close_notify not delivered: {e}");
                break;
            }
        }
    }
}
