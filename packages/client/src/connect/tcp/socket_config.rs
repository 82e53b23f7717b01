//! Per-operation socket settings

use std::net::TcpStream;
use std::time::Duration;

use crate::error::{Error, Result};

/// Apply the receive timeout (`SO_RCVTIMEO`); `None` clears it.
pub fn apply_read_timeout(stream: &TcpStream, timeout: Option<Duration>) -> Result<()> {
    stream
        .set_read_timeout(timeout.filter(|t| !t.is_zero()))
        .map_err(|e| Error::system(&e))
}

/// Apply the send timeout (`SO_SNDTIMEO`); `None` clears it.
pub fn apply_write_timeout(stream: &TcpStream, timeout: Option<Duration>) -> Result<()> {
    stream
        .set_write_timeout(timeout.filter(|t| !t.is_zero()))
        .map_err(|e| Error::system(&e))
}
