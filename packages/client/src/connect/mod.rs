//! Connection establishment
//!
//! Socket-level building blocks used by [`crate::Connection`].

pub mod tcp;

pub use tcp::{Interest, connect_with_timeout, wait_ready};
