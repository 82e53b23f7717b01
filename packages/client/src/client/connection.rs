//! The connection handle
//!
//! A [`Connection`] owns everything one proxied, optionally encrypted TCP
//! stream needs: the proxy chain, the target, the resolver, the timeout,
//! the socket with its TLS session, and the most recent error. Every
//! public operation records its outcome, so [`Connection::last_error`]
//! always describes the last call.

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use super::stats::ConnectionStats;
use super::transport::Transport;
use crate::config::{ConnectionConfig, timeout_to_millis};
use crate::connect::tcp::connect_with_timeout;
use crate::dns::{Resolve, resolver_for};
use crate::error::{Error, ErrorCode, Result};
use crate::proxy::{HostInfo, ProxyChain, ProxyHop, ProxyType, negotiate_chain};

/// A client connection, direct or through a proxy chain.
pub struct Connection {
    transport: Transport,
    chain: ProxyChain,
    target: HostInfo,
    resolver: Arc<dyn Resolve>,
    config: ConnectionConfig,
    #[cfg(feature = "__rustls")]
    tls_config: Option<Arc<rustls::ClientConfig>>,
    last_error: Option<Error>,
    stats: ConnectionStats,
}

impl Default for Connection {
    fn default() -> Self {
        Self::new()
    }
}

impl Connection {
    /// A disconnected connection with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ConnectionConfig::default())
    }

    #[must_use]
    pub fn with_config(config: ConnectionConfig) -> Self {
        Self {
            transport: Transport::new(config.timeout()),
            chain: ProxyChain::new(),
            target: HostInfo::default(),
            resolver: resolver_for(config.resolver),
            config,
            #[cfg(feature = "__rustls")]
            tls_config: None,
            last_error: None,
            stats: ConnectionStats::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Timeout for connect, every handshake step, send and receive.
    ///
    /// `None` (or a zero duration) blocks indefinitely. Sub-millisecond
    /// remainders round up. Applies from the next operation on, connected
    /// or not.
    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.config.timeout_ms = timeout_to_millis(timeout);
        self.transport.set_timeout(self.config.timeout());
        self.last_error = None;
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.transport.timeout()
    }

    /// Replace the resolver used for the target and every hop.
    pub fn set_resolver(&mut self, resolver: Arc<dyn Resolve>) {
        self.resolver = resolver;
    }

    /// Use `config` for the TLS handshakes of later connects.
    #[cfg(feature = "__rustls")]
    pub fn set_tls_config(&mut self, config: Arc<rustls::ClientConfig>) {
        self.tls_config = Some(config);
    }

    /// Append a hop to the proxy chain.
    ///
    /// SOCKS5 authenticates only when both `username` and `password` are
    /// given. SOCKS4 refuses credentials with `Socks4NoAuth`.
    pub fn add_proxy(
        &mut self,
        kind: ProxyType,
        host: &str,
        port: u16,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<()> {
        let mut hop = ProxyHop::new(kind, host, port);
        hop.username = username.map(str::to_owned);
        hop.password = password.map(str::to_owned);
        self.add_proxy_hop(hop)
    }

    pub fn add_proxy_hop(&mut self, hop: ProxyHop) -> Result<()> {
        let result = self.chain.push(hop);
        self.record(result)
    }

    #[must_use]
    pub fn proxies(&self) -> &ProxyChain {
        &self.chain
    }

    /// The host of the last connect, empty after [`clear`](Self::clear).
    #[must_use]
    pub fn target(&self) -> &HostInfo {
        &self.target
    }

    /// Dial `host:port`, through every configured hop, optionally
    /// finishing with a TLS handshake against `host`.
    ///
    /// A live connection is torn down first. On failure nothing stays
    /// open; errors raised while reaching or negotiating with a proxy
    /// name that hop via [`Error::failed_proxy`].
    pub fn connect(&mut self, host: &str, port: u16, use_tls: bool) -> Result<()> {
        let result = self.establish(host, port, use_tls);
        self.stats.record_connect(result.is_ok());
        if result.is_err() {
            self.transport.close();
        }
        self.record(result)
    }

    /// Write `buf`; `chunk` caps each write (`0` = whole buffer at once).
    pub fn send(&mut self, buf: &[u8], chunk: usize) -> Result<usize> {
        let result = self.transport.send(buf, chunk);
        self.stats.record_sent(transferred(&result));
        self.record(result)
    }

    /// Read into `buf`; `chunk` caps each read (`0` = whole buffer).
    ///
    /// Stops at the first short read, so without `chunk` this behaves like
    /// a single `read`. `Ok(0)` means the peer closed.
    pub fn recv(&mut self, buf: &mut [u8], chunk: usize) -> Result<usize> {
        let result = self.transport.recv(buf, chunk);
        self.stats.record_received(transferred(&result));
        self.record(result)
    }

    /// Read through the next `\n`, NUL-terminating the line in `buf`.
    pub fn read_line(&mut self, buf: &mut [u8]) -> Result<usize> {
        let result = self.transport.read_line(buf);
        self.stats.record_received(transferred(&result));
        self.record(result)
    }

    /// Whether a receive would return without blocking.
    pub fn peek(&mut self) -> Result<bool> {
        let result = self.transport.peek();
        self.record(result)
    }

    /// Close TLS and the socket. Calling it again is a no-op.
    pub fn disconnect(&mut self) -> Result<()> {
        self.transport.close();
        self.record(Ok(()))
    }

    /// Forget the proxy chain and target. The socket is left alone.
    pub fn clear(&mut self) -> Result<()> {
        self.chain.clear();
        self.target.clear();
        self.record(Ok(()))
    }

    /// Outcome of the most recent operation, `None` when it succeeded.
    #[must_use]
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    #[must_use]
    pub fn is_tls(&self) -> bool {
        self.transport.is_tls()
    }

    #[must_use]
    pub fn stats(&self) -> ConnectionStats {
        self.stats
    }

    pub fn peer_addr(&self) -> Result<SocketAddr> {
        self.transport.peer_addr()
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.transport.local_addr()
    }

    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        self.last_error = result.as_ref().err().cloned();
        result
    }

    fn establish(&mut self, host: &str, port: u16, use_tls: bool) -> Result<()> {
        if host.is_empty() || port == 0 {
            return Err(Error::own(ErrorCode::Null));
        }
        #[cfg(not(feature = "__rustls"))]
        if use_tls {
            return Err(Error::own(ErrorCode::NoTls));
        }
        if self.transport.is_connected() {
            tracing::debug!("reconnecting, closing the current connection first");
            self.transport.close();
        }

        self.target = HostInfo::new(host, port);
        let proxied = !self.chain.is_empty();
        let resolver = Arc::clone(&self.resolver);
        let timeout = self.transport.timeout();

        let first = match self.chain.hops_mut().first_mut() {
            Some(hop) => &mut hop.host,
            None => &mut self.target,
        };
        tracing::debug!("dialing {first} (timeout {timeout:?})");
        let on_first_hop = |e: Error| if proxied { e.with_failed_proxy(0) } else { e };
        let addr = first.resolve(resolver.as_ref()).map_err(on_first_hop)?;
        let stream = connect_with_timeout(addr, timeout).map_err(on_first_hop)?;
        self.transport.attach(stream);

        if proxied {
            negotiate_chain(
                &mut self.transport,
                &mut self.chain,
                &mut self.target,
                resolver.as_ref(),
            )?;
        }

        if use_tls {
            #[cfg(feature = "__rustls")]
            self.start_tls()?;
        }
        tracing::debug!("connected to {}", self.target);
        Ok(())
    }

    #[cfg(feature = "__rustls")]
    fn start_tls(&mut self) -> Result<()> {
        let config = match &self.tls_config {
            Some(config) => Arc::clone(config),
            None => crate::tls::default_config(self.config.tls_roots)?,
        };
        self.transport.start_tls(config, self.target.host())
    }
}

fn transferred(result: &Result<usize>) -> usize {
    match result {
        Ok(n) => *n,
        Err(e) => e.bytes_transferred(),
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("target", &self.target)
            .field("proxies", &self.chain.len())
            .field("timeout", &self.transport.timeout())
            .field("connected", &self.is_connected())
            .field("tls", &self.is_tls())
            .field("last_error", &self.last_error)
            .finish()
    }
}
