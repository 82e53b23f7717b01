//! Address resolution
//!
//! A `Resolve` capability with a DNS-backed and a literal-only variant.

#[cfg(feature = "dns")]
pub mod gai;
pub mod literal;
pub mod traits;

#[cfg(feature = "dns")]
pub use gai::GaiResolver;
pub use literal::{LiteralResolver, is_numeric_ipv4, parse_ipv4};
pub use traits::Resolve;

use std::sync::Arc;

use crate::config::ResolverMode;

/// Build the resolver a [`ResolverMode`] asks for.
///
/// Without the `dns` feature `System` degrades to the literal resolver.
#[must_use]
pub fn resolver_for(mode: ResolverMode) -> Arc<dyn Resolve> {
    match mode {
        #[cfg(feature = "dns")]
        ResolverMode::System => Arc::new(GaiResolver::new()),
        #[cfg(not(feature = "dns"))]
        ResolverMode::System => {
            tracing::warn!("built without the dns feature, using literal-only resolution");
            Arc::new(LiteralResolver::new())
        }
        ResolverMode::Ipv4Literal => Arc::new(LiteralResolver::new()),
    }
}
