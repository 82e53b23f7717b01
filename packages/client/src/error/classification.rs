use super::codes::ErrorCode;
use super::types::{Error, ErrorOrigin};

impl Error {
    /// Returns true for any of the connect, read or write timeouts.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(
            self.own_code(),
            Some(
                ErrorCode::HitTimeout
                    | ErrorCode::HitConnectTimeout
                    | ErrorCode::HitReadTimeout
                    | ErrorCode::HitWriteTimeout
            )
        )
    }

    #[must_use]
    pub fn is_connect_timeout(&self) -> bool {
        self.own_code() == Some(ErrorCode::HitConnectTimeout)
    }

    #[must_use]
    pub fn is_read_timeout(&self) -> bool {
        self.own_code() == Some(ErrorCode::HitReadTimeout)
    }

    #[must_use]
    pub fn is_write_timeout(&self) -> bool {
        self.own_code() == Some(ErrorCode::HitWriteTimeout)
    }

    /// Returns true if the failure happened while dialing or negotiating a
    /// proxy hop.
    #[must_use]
    pub fn is_proxy_failure(&self) -> bool {
        self.failed_proxy.is_some()
    }

    #[must_use]
    pub fn is_tls(&self) -> bool {
        self.origin == ErrorOrigin::Tls
            || matches!(self.own_code(), Some(ErrorCode::TlsGeneric | ErrorCode::NoTls))
    }

    #[must_use]
    pub fn is_resolve(&self) -> bool {
        self.origin == ErrorOrigin::Resolve
    }

    #[must_use]
    pub fn is_system(&self) -> bool {
        self.origin == ErrorOrigin::System
    }
}
