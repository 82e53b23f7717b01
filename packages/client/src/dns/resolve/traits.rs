//! Resolver capability
//!
//! Contains the `Resolve` trait through which every hop and target address
//! is looked up.

use std::net::SocketAddr;

use crate::error::Result;

/// Turns a host name and port into one connectable socket address.
pub trait Resolve: Send + Sync {
    /// Resolve `host` and attach `port` to the first usable address.
    fn resolve(&self, host: &str, port: u16) -> Result<SocketAddr>;
}
