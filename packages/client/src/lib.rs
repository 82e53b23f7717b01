//! # Hopsock client
//!
//! Blocking TCP client connections tunnelled through chains of SOCKS4/4a,
//! SOCKS5 and HTTP CONNECT proxies, optionally finished with TLS.
//!
//! ## Features
//!
//! - **Proxy chains** of up to [`MAX_PROXIES`](proxy::MAX_PROXIES) hops,
//!   each negotiating a tunnel to the next
//! - **One timeout** bounding connect, every handshake step, send and receive
//! - **Rustls TLS** with bundled or platform trust roots
//! - **Structured errors** naming their origin, source location, failing
//!   hop and the bytes moved before the failure
//!
//! ## Usage
//!
//! ```no_run
//! use hopsock_client::{Connection, ProxyType};
//!
//! let mut conn = Connection::new();
//! conn.add_proxy(ProxyType::Socks5, "127.0.0.1", 1080, None, None)?;
//! conn.connect("example.com", 80, false)?;
//! conn.send(b"HEAD / HTTP/1.0\r\n\r\n", 0)?;
//!
//! let mut line = [0u8; 256];
//! let len = conn.read_line(&mut line)?;
//! println!("{}", String::from_utf8_lossy(&line[..len]));
//! conn.disconnect()?;
//! # Ok::<(), hopsock_client::Error>(())
//! ```
//!
//! ## Feature flags
//!
//! - `dns` (default): resolve names through the system resolver
//! - `__rustls` (default): TLS support

#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod connect;
pub mod dns;
pub mod error;
pub mod proxy;
#[cfg(feature = "__rustls")]
pub mod tls;

pub mod prelude;

pub use crate::prelude::*;

/// Process-wide setup, run once before connecting.
///
/// Prepares the TLS layer when built with it; otherwise does nothing.
pub fn init() -> Result<()> {
    #[cfg(feature = "__rustls")]
    tls::init()?;
    tracing::debug!("hopsock initialised");
    Ok(())
}

/// Counterpart of [`init`]; release process-wide state. Idempotent.
pub fn shutdown() {
    #[cfg(feature = "__rustls")]
    tls::shutdown();
}
