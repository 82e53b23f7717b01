pub mod resolve;

pub use resolve::{LiteralResolver, Resolve, resolver_for};
#[cfg(feature = "dns")]
pub use resolve::GaiResolver;
