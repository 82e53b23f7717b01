//! Hopsock prelude
//!
//! The types most callers need to dial, talk and inspect failures.

pub use crate::client::{Connection, ConnectionStats};
pub use crate::config::{ConnectionConfig, ResolverMode, TlsRoots};
pub use crate::dns::{LiteralResolver, Resolve};
pub use crate::error::{Error, ErrorCode, ErrorOrigin, Result};
pub use crate::proxy::{HostInfo, MAX_PROXIES, ProxyChain, ProxyHop, ProxyType};

#[cfg(feature = "dns")]
pub use crate::dns::GaiResolver;
