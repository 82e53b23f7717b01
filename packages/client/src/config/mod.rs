//! Connection configuration

pub mod timeouts;
pub mod types;

pub use timeouts::{millis_to_timeout, timeout_to_millis};
pub use types::{ConnectionConfig, DEFAULT_TIMEOUT_MS, ResolverMode, TlsRoots};
