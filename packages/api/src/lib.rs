//! Hopsock public API
//!
//! Fluent construction of proxied, optionally TLS-wrapped TCP connections.
//! Configure timeout, resolution, trust roots and the proxy chain on a
//! [`ConnectionBuilder`], then dial.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! let mut conn = hopsock::Hopsock::builder()
//!     .timeout(Duration::from_secs(10))
//!     .socks5_auth("10.0.0.1", 1080, "user", "secret")
//!     .http("10.0.0.2", 3128)
//!     .tls(true)
//!     .connect("example.com", 443)?;
//!
//! conn.send(b"GET / HTTP/1.0\r\nHost: example.com\r\n\r\n", 0)?;
//! # Ok::<(), hopsock::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;

pub use builder::ConnectionBuilder;

// Re-export the types callers handle after building
pub use hopsock_client::{
    Connection, ConnectionConfig, ConnectionStats, Error, ErrorCode, ErrorOrigin, HostInfo,
    LiteralResolver, MAX_PROXIES, ProxyChain, ProxyHop, ProxyType, Resolve, ResolverMode, Result,
    TlsRoots,
};
#[cfg(feature = "dns")]
pub use hopsock_client::GaiResolver;

/// Main entry point
pub struct Hopsock;

impl Hopsock {
    /// Start a builder with the default configuration.
    #[must_use]
    pub fn builder() -> ConnectionBuilder {
        ConnectionBuilder::new()
    }

    /// Start a builder from an existing configuration.
    #[must_use]
    pub fn with_config(config: ConnectionConfig) -> ConnectionBuilder {
        ConnectionBuilder::with_config(config)
    }

    /// Dial `host:port` directly with the default configuration.
    pub fn connect(host: &str, port: u16) -> Result<Connection> {
        ConnectionBuilder::new().connect(host, port)
    }
}

/// Process-wide setup. See [`hopsock_client::init`].
pub fn init() -> Result<()> {
    hopsock_client::init()
}

/// Process-wide teardown. See [`hopsock_client::shutdown`].
pub fn shutdown() {
    hopsock_client::shutdown();
}
