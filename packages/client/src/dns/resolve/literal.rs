//! Resolver for builds and deployments without name service
//!
//! Accepts dotted-quad IPv4 literals only and never touches the network.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use super::traits::Resolve;
use crate::error::{Error, ErrorCode, Result};

/// Synthesizes IPv4 socket addresses straight from literals.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralResolver;

impl LiteralResolver {
    pub fn new() -> Self {
        Self
    }
}

impl Resolve for LiteralResolver {
    fn resolve(&self, host: &str, port: u16) -> Result<SocketAddr> {
        match parse_ipv4(host) {
            Some(ip) => Ok(SocketAddr::V4(SocketAddrV4::new(ip, port))),
            None => {
                tracing::debug!("name resolution disabled, {host:?} is not an IPv4 literal");
                Err(Error::own(ErrorCode::Null))
            }
        }
    }
}

/// Parse a strict dotted-quad IPv4 literal.
#[must_use]
pub fn parse_ipv4(host: &str) -> Option<Ipv4Addr> {
    host.parse::<Ipv4Addr>().ok()
}

/// Returns true if `host` is a dotted-quad IPv4 literal.
#[must_use]
pub fn is_numeric_ipv4(host: &str) -> bool {
    parse_ipv4(host).is_some()
}
