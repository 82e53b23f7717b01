//! Fluent connection builder
//!
//! Split by concern: base settings, proxy hops, and dialing.

pub mod core;
pub mod dial;
pub mod proxies;

pub use self::core::ConnectionBuilder;
