//! TLS bootstrap on top of rustls
//!
//! [`init`] and [`shutdown`] bracket process-wide TLS use: the first
//! installs the ring crypto provider and caches a default client
//! configuration, the second drops the cache. Connections still work
//! without [`init`], building their configuration on demand.

pub mod config;
pub mod errors;
pub mod session;

use std::sync::{Arc, PoisonError, RwLock};

use rustls::ClientConfig;

pub use config::build_client_config;
pub use session::handshake;

use crate::config::TlsRoots;
use crate::error::Result;

static DEFAULT_CONFIG: RwLock<Option<Arc<ClientConfig>>> = RwLock::new(None);

/// One-time TLS setup; call before the first TLS connection. Idempotent.
pub fn init() -> Result<()> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        tracing::trace!("a process-wide crypto provider is already installed");
    }
    let config = build_client_config(TlsRoots::WebPki)?;
    *DEFAULT_CONFIG.write().unwrap_or_else(PoisonError::into_inner) = Some(config);
    Ok(())
}

/// Release what [`init`] cached; call after the last TLS connection.
pub fn shutdown() {
    DEFAULT_CONFIG
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
}

/// The configuration a connection uses when none was set explicitly.
pub fn default_config(roots: TlsRoots) -> Result<Arc<ClientConfig>> {
    if roots == TlsRoots::WebPki {
        let cached = DEFAULT_CONFIG
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(config) = cached {
            return Ok(config);
        }
    }
    build_client_config(roots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_and_shutdown_are_repeatable() {
        init().expect("init");
        init().expect("second init");
        let first = default_config(TlsRoots::WebPki).expect("cached");
        let second = default_config(TlsRoots::WebPki).expect("cached");
        assert!(Arc::ptr_eq(&first, &second));
        shutdown();
        shutdown();
        assert!(default_config(TlsRoots::WebPki).is_ok());
    }
}
