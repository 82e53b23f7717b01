//! Client configuration construction
//!
//! Certificate validation is whatever rustls' webpki verifier decides for
//! the chosen trust anchors.

use std::sync::Arc;

use rustls::{ClientConfig, RootCertStore};

use crate::config::TlsRoots;
use crate::error::{Error, ErrorCode, Result};

/// Build a client configuration on the ring provider.
pub fn build_client_config(roots: TlsRoots) -> Result<Arc<ClientConfig>> {
    let root_store = root_store(roots);
    if root_store.is_empty() {
        tracing::warn!("TLS root store is empty, every server certificate will be rejected");
    }

    let config = ClientConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_safe_default_protocol_versions()
    .map_err(|e| {
        tracing::error!("failed to create TLS client context: {e}");
        Error::own(ErrorCode::TlsGeneric)
    })?
    .with_root_certificates(root_store)
    .with_no_client_auth();

    Ok(Arc::new(config))
}

fn root_store(roots: TlsRoots) -> RootCertStore {
    match roots {
        TlsRoots::WebPki => RootCertStore {
            roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
        },
        TlsRoots::Native => {
            let loaded = rustls_native_certs::load_native_certs();
            for err in &loaded.errors {
                tracing::debug!("skipping native certificate source: {err}");
            }
            let mut store = RootCertStore::empty();
            let (added, ignored) = store.add_parsable_certificates(loaded.certs);
            tracing::debug!("loaded {added} native roots, ignored {ignored}");
            store
        }
    }
}
