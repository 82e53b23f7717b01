//! Newline-delimited reads

use super::transport::Transport;
use crate::error::{Error, ErrorCode, Result};

impl Transport {
    /// Read one byte at a time until a `\n` is stored.
    ///
    /// The newline is kept and a NUL is written right after it, so `buf`
    /// needs one byte of headroom. Returns the line length including the
    /// newline. A full buffer fails with `OutOfBuffer`, a peer that closes
    /// mid-line with `PeerClosed`; both report the bytes already stored.
    pub fn read_line(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Err(Error::own(ErrorCode::Null));
        }

        let mut len = 0;
        while len < buf.len() {
            let n = self
                .recv(&mut buf[len..=len], 1)
                .map_err(|e| e.with_transferred(len))?;
            if n == 0 {
                return Err(Error::own(ErrorCode::PeerClosed).with_transferred(len));
            }
            len += 1;
            if buf[len - 1] == b'\n' {
                if len == buf.len() {
                    break;
                }
                buf[len] = 0;
                return Ok(len);
            }
        }
        Err(Error::own(ErrorCode::OutOfBuffer).with_transferred(len))
    }
}
