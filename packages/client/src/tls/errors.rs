//! Numeric codes for TLS failures
//!
//! rustls reports failures as enum values; the error record wants a raw
//! integer, so each variant family gets a stable number.

/// Stable code for a rustls error variant.
#[must_use]
pub fn error_code(err: &rustls::Error) -> i32 {
    use rustls::Error as E;
    match err {
        E::InappropriateMessage { .. } => 1,
        E::InappropriateHandshakeMessage { .. } => 2,
        E::InvalidMessage(_) => 3,
        E::NoCertificatesPresented => 4,
        E::UnsupportedNameType => 5,
        E::DecryptError => 6,
        E::EncryptError => 7,
        E::PeerIncompatible(_) => 8,
        E::PeerMisbehaved(_) => 9,
        E::AlertReceived(_) => 10,
        E::InvalidCertificate(_) => 11,
        E::InvalidCertRevocationList(_) => 12,
        E::General(_) => 13,
        E::FailedToGetCurrentTime => 14,
        E::FailedToGetRandomBytes => 15,
        E::HandshakeNotComplete => 16,
        E::PeerSentOversizedRecord => 17,
        E::NoApplicationProtocol => 18,
        _ => 255,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_map_to_distinct_codes() {
        assert_eq!(error_code(&rustls::Error::DecryptError), 6);
        assert_eq!(error_code(&rustls::Error::General("boom".into())), 13);
        assert_eq!(error_code(&rustls::Error::HandshakeNotComplete), 16);
    }
}
