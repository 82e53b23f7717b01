//! Connection handle and its I/O engine
//!
//! [`Connection`] is the public face; [`Transport`] moves the bytes and
//! doubles as the handshake channel for proxy negotiation.

pub mod connection;
pub mod line;
pub mod stats;
pub mod transport;

pub use connection::Connection;
pub use stats::ConnectionStats;
pub use transport::{Direction, Transport};
