//! `ConnectionBuilder` state and base settings

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use hopsock_client::{ConnectionConfig, ProxyHop, Resolve, ResolverMode, TlsRoots};

/// Collects everything a [`Connection`](hopsock_client::Connection) needs
/// before it dials.
#[derive(Clone, Default)]
pub struct ConnectionBuilder {
    pub(crate) config: ConnectionConfig,
    pub(crate) hops: Vec<ProxyHop>,
    pub(crate) resolver: Option<Arc<dyn Resolve>>,
    pub(crate) use_tls: bool,
}

impl ConnectionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: ConnectionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Bound connect, handshakes, send and receive. `Duration::ZERO`
    /// blocks indefinitely.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Block indefinitely on every operation.
    #[must_use]
    pub fn no_timeout(self) -> Self {
        self.timeout(Duration::ZERO)
    }

    #[must_use]
    pub fn resolver_mode(mut self, mode: ResolverMode) -> Self {
        self.config = self.config.with_resolver(mode);
        self
    }

    /// Use a custom resolver for the target and every hop.
    ///
    /// Takes precedence over [`resolver_mode`](Self::resolver_mode).
    #[must_use]
    pub fn resolver(mut self, resolver: Arc<dyn Resolve>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    #[must_use]
    pub fn tls_roots(mut self, roots: TlsRoots) -> Self {
        self.config = self.config.with_tls_roots(roots);
        self
    }

    /// Finish the connection with a TLS handshake against the target.
    #[must_use]
    pub fn tls(mut self, enabled: bool) -> Self {
        self.use_tls = enabled;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    #[must_use]
    pub fn hops(&self) -> &[ProxyHop] {
        &self.hops
    }
}

impl fmt::Debug for ConnectionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionBuilder")
            .field("config", &self.config)
            .field("hops", &self.hops)
            .field("custom_resolver", &self.resolver.is_some())
            .field("use_tls", &self.use_tls)
            .finish()
    }
}
