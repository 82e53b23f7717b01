//! Core proxy types
//!
//! Host info, proxy kinds and the per-hop descriptor consumed by the chain
//! negotiator.

use std::fmt;
use std::net::SocketAddr;

use crate::dns::Resolve;
use crate::error::{Error, ErrorCode, Result};

/// Protocol spoken by a proxy hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProxyType {
    /// No handshake, the hop is passed through.
    #[default]
    None,
    /// SOCKS4, trying the 4a hostname extension first.
    Socks4,
    /// SOCKS5 with optional username/password authentication.
    Socks5,
    /// HTTP `CONNECT` tunnel.
    Http,
}

impl fmt::Display for ProxyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProxyType::None => "none",
            ProxyType::Socks4 => "socks4",
            ProxyType::Socks5 => "socks5",
            ProxyType::Http => "http",
        })
    }
}

/// A host name, a port and the address it last resolved to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostInfo {
    host: String,
    port: u16,
    addr: Option<SocketAddr>,
}

impl HostInfo {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            addr: None,
        }
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The address stored by the last successful [`HostInfo::resolve`].
    #[must_use]
    pub fn resolved(&self) -> Option<SocketAddr> {
        self.addr
    }

    /// Returns true when both host and port are set.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.host.is_empty() && self.port != 0
    }

    /// Resolve host and port through `resolver`, keeping the result.
    pub fn resolve(&mut self, resolver: &dyn Resolve) -> Result<SocketAddr> {
        if !self.is_valid() {
            return Err(Error::own(ErrorCode::Null));
        }
        let addr = resolver.resolve(&self.host, self.port)?;
        self.addr = Some(addr);
        Ok(addr)
    }

    /// Drop the host name and resolved address. Safe to repeat.
    pub fn clear(&mut self) {
        self.host = String::new();
        self.port = 0;
        self.addr = None;
    }
}

impl fmt::Display for HostInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// One configured proxy in a chain.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxyHop {
    pub(crate) kind: ProxyType,
    pub(crate) host: HostInfo,
    pub(crate) username: Option<String>,
    pub(crate) password: Option<String>,
}

impl ProxyHop {
    pub fn new(kind: ProxyType, host: impl Into<String>, port: u16) -> Self {
        Self {
            kind,
            host: HostInfo::new(host, port),
            username: None,
            password: None,
        }
    }

    /// Attach username/password credentials.
    #[must_use]
    pub fn with_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn kind(&self) -> ProxyType {
        self.kind
    }

    #[must_use]
    pub fn host_info(&self) -> &HostInfo {
        &self.host
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Username and password when both are present.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.username.as_deref()?, self.password.as_deref()?))
    }

    /// Drop host, address and credentials. Safe to repeat.
    pub fn clear(&mut self) {
        self.host.clear();
        self.username = None;
        self.password = None;
    }
}

impl fmt::Debug for ProxyHop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyHop")
            .field("kind", &self.kind)
            .field("host", &self.host)
            .field("auth", &self.username.is_some())
            .finish()
    }
}
