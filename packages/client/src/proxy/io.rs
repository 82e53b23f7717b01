//! Byte channel used by the handshakes
//!
//! Implemented by the connection transport, so proxy negotiation shares the
//! timeout behaviour of application traffic.

use crate::error::Result;

/// Size of the scratch buffer for handshake replies.
pub const HANDSHAKE_BUFFER_SIZE: usize = 768;

/// Send/receive primitives with the I/O engine's chunk semantics.
pub trait HandshakeIo {
    /// Send all of `buf`, at most `chunk` bytes per attempt (`0` = no limit).
    fn send(&mut self, buf: &[u8], chunk: usize) -> Result<usize>;

    /// Receive into `buf`; stops early on a short transfer or peer shutdown.
    fn recv(&mut self, buf: &mut [u8], chunk: usize) -> Result<usize>;
}

#[cfg(test)]
pub(crate) mod scripted {
    use std::collections::VecDeque;

    use super::HandshakeIo;
    use crate::error::Result;

    /// Replays canned replies and records everything sent.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedIo {
        replies: VecDeque<Vec<u8>>,
        pub(crate) sent: Vec<Vec<u8>>,
    }

    impl ScriptedIo {
        pub(crate) fn new<I, R>(replies: I) -> Self
        where
            I: IntoIterator<Item = R>,
            R: AsRef<[u8]>,
        {
            Self {
                replies: replies.into_iter().map(|r| r.as_ref().to_vec()).collect(),
                sent: Vec::new(),
            }
        }
    }

    impl HandshakeIo for ScriptedIo {
        fn send(&mut self, buf: &[u8], _chunk: usize) -> Result<usize> {
            self.sent.push(buf.to_vec());
            Ok(buf.len())
        }

        fn recv(&mut self, buf: &mut [u8], _chunk: usize) -> Result<usize> {
            let Some(mut reply) = self.replies.pop_front() else {
                return Ok(0);
            };
            let n = reply.len().min(buf.len());
            buf[..n].copy_from_slice(&reply[..n]);
            if n < reply.len() {
                self.replies.push_front(reply.split_off(n));
            }
            Ok(n)
        }
    }
}
