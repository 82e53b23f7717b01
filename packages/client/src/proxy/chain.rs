//! Ordered proxy chain
//!
//! Hops are stored in append order, which is also the tunneling order:
//! hop 0 is dialed first and every hop tunnels to the next one.

use super::types::{ProxyHop, ProxyType};
use crate::error::{Error, ErrorCode, Result};

/// Maximum number of hops in one chain.
pub const MAX_PROXIES: usize = 16;

/// Append-only list of proxy hops, capped at [`MAX_PROXIES`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyChain {
    hops: Vec<ProxyHop>,
}

impl ProxyChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a hop.
    ///
    /// SOCKS4 hops cannot carry credentials; HTTP hops have theirs dropped
    /// since `CONNECT` is sent without a `Proxy-Authorization` header.
    pub fn push(&mut self, mut hop: ProxyHop) -> Result<()> {
        if self.hops.len() >= MAX_PROXIES {
            return Err(Error::own(ErrorCode::ExceedProxyLimit));
        }
        if !hop.host.is_valid() {
            return Err(Error::own(ErrorCode::Null));
        }
        match hop.kind {
            ProxyType::Socks4 if hop.username.is_some() || hop.password.is_some() => {
                return Err(Error::own(ErrorCode::Socks4NoAuth));
            }
            ProxyType::Http | ProxyType::None if hop.username.is_some() => {
                tracing::warn!("credentials for {} proxy {} are ignored", hop.kind, hop.host);
                hop.username = None;
                hop.password = None;
            }
            _ => {}
        }
        tracing::debug!("proxy #{} added: {} {}", self.hops.len(), hop.kind, hop.host);
        self.hops.push(hop);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// Index of the last configured hop, `None` when the chain is empty.
    #[must_use]
    pub fn last_index(&self) -> Option<usize> {
        self.hops.len().checked_sub(1)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ProxyHop> {
        self.hops.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProxyHop> {
        self.hops.iter()
    }

    pub(crate) fn hops_mut(&mut self) -> &mut [ProxyHop] {
        &mut self.hops
    }

    /// Release every hop's strings and addresses and empty the chain.
    pub fn clear(&mut self) {
        for hop in &mut self.hops {
            hop.clear();
        }
        self.hops.clear();
    }
}

impl<'a> IntoIterator for &'a ProxyChain {
    type Item = &'a ProxyHop;
    type IntoIter = std::slice::Iter<'a, ProxyHop>;

    fn into_iter(self) -> Self::IntoIter {
        self.hops.iter()
    }
}
