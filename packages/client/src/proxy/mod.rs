//! Proxy chain support
//!
//! Hop descriptors, the bounded chain and the SOCKS4/4a, SOCKS5 and
//! HTTP CONNECT handshakes that tunnel through it.

pub mod chain;
pub mod http_connect;
pub mod io;
pub mod negotiator;
pub mod socks4;
pub mod socks5;
pub mod types;

pub use chain::{MAX_PROXIES, ProxyChain};
pub use io::{HANDSHAKE_BUFFER_SIZE, HandshakeIo};
pub use negotiator::negotiate_chain;
pub use types::{HostInfo, ProxyHop, ProxyType};
