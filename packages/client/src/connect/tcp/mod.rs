//! TCP socket primitives
//!
//! Readiness waits, timeout-bounded connect and per-operation socket
//! timeouts.

pub mod nonblocking;
pub mod readiness;
pub mod socket_config;

pub use nonblocking::connect_with_timeout;
pub use readiness::{Interest, is_readable, wait_ready};
pub use socket_config::{apply_read_timeout, apply_write_timeout};
