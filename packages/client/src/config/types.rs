//! Connection configuration types
//!
//! Serializable settings consumed by [`crate::Connection::with_config`].

use serde::{Deserialize, Serialize};

/// Default per-operation timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 60 * 1000;

/// How host names become socket addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverMode {
    /// System `getaddrinfo`.
    System,
    /// Name resolution disabled, only dotted-quad IPv4 literals are accepted.
    Ipv4Literal,
}

impl Default for ResolverMode {
    fn default() -> Self {
        if cfg!(feature = "dns") {
            ResolverMode::System
        } else {
            ResolverMode::Ipv4Literal
        }
    }
}

/// Trust anchors for the default TLS client configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TlsRoots {
    /// Mozilla roots bundled through `webpki-roots`.
    #[default]
    WebPki,
    /// The platform certificate store.
    Native,
}

/// Settings applied to a [`crate::Connection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Timeout for connect and every send/receive, in milliseconds.
    /// `0` blocks indefinitely.
    pub timeout_ms: u64,
    pub resolver: ResolverMode,
    pub tls_roots: TlsRoots,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            resolver: ResolverMode::default(),
            tls_roots: TlsRoots::default(),
        }
    }
}
