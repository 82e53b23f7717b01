//! Proxy hop methods
//!
//! Hops are dialed in the order they are added; validation happens when
//! the builder turns into a connection.

use hopsock_client::{ProxyHop, ProxyType};

use super::core::ConnectionBuilder;

impl ConnectionBuilder {
    /// Append a SOCKS4 hop; the 4a form is tried first.
    #[must_use]
    pub fn socks4(self, host: impl Into<String>, port: u16) -> Self {
        self.proxy(ProxyHop::new(ProxyType::Socks4, host, port))
    }

    #[must_use]
    pub fn socks5(self, host: impl Into<String>, port: u16) -> Self {
        self.proxy(ProxyHop::new(ProxyType::Socks5, host, port))
    }

    /// Append a SOCKS5 hop that authenticates with username/password.
    #[must_use]
    pub fn socks5_auth(
        self,
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.proxy(ProxyHop::new(ProxyType::Socks5, host, port).with_auth(username, password))
    }

    /// Append an HTTP `CONNECT` hop.
    #[must_use]
    pub fn http(self, host: impl Into<String>, port: u16) -> Self {
        self.proxy(ProxyHop::new(ProxyType::Http, host, port))
    }

    #[must_use]
    pub fn proxy(mut self, hop: ProxyHop) -> Self {
        self.hops.push(hop);
        self
    }
}
