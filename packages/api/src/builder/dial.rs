//! Turning a builder into a connection

use hopsock_client::{Connection, Result};

use super::core::ConnectionBuilder;

impl ConnectionBuilder {
    /// Build a disconnected [`Connection`] carrying this configuration.
    ///
    /// Fails on the first hop the chain rejects: too many hops, an empty
    /// host or credentials on a SOCKS4 hop.
    pub fn build(self) -> Result<Connection> {
        let mut conn = Connection::with_config(self.config);
        if let Some(resolver) = self.resolver {
            conn.set_resolver(resolver);
        }
        for hop in self.hops {
            conn.add_proxy_hop(hop)?;
        }
        Ok(conn)
    }

    /// Build and dial `host:port` in one go.
    pub fn connect(self, host: &str, port: u16) -> Result<Connection> {
        let use_tls = self.use_tls;
        let mut conn = self.build()?;
        conn.connect(host, port, use_tls)?;
        tracing::debug!("builder connected to {host}:{port}");
        Ok(conn)
    }
}
