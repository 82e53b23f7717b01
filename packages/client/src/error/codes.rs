//! Library-defined error codes
//!
//! The numeric values are stable and form the raw code of every own-origin
//! error. The `#[error]` strings double as the code-to-message table.

/// Error codes raised by the library itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[repr(i32)]
pub enum ErrorCode {
    #[error("no error")]
    NoError = 0,
    #[error("invalid or missing argument")]
    Null = 1,
    #[error("proxy chain limit exceeded")]
    ExceedProxyLimit = 2,
    #[error("TLS support not compiled in")]
    NoTls = 3,
    #[error("no socket, not connected")]
    NoSocket = 4,
    #[error("timeout reached")]
    HitTimeout = 5,
    #[error("buffer too small")]
    OutOfBuffer = 6,
    #[error("generic TLS failure")]
    TlsGeneric = 7,
    #[error("SOCKS4 proxies do not support authentication")]
    Socks4NoAuth = 8,
    #[error("SOCKS5 hostname or credentials exceed 255 bytes")]
    Socks5AuthExceedSize = 9,
    #[error("SOCKS4 proxies cannot reach IPv6 targets")]
    Socks4NoIp6 = 10,
    #[error("unexpected response from proxy")]
    ProxyUnexpectedResponse = 11,
    #[error("proxy could not connect to target")]
    TargetProxyConnectFailed = 12,
    #[error("proxy authentication failed or not allowed")]
    ProxyAuthFailed = 13,
    #[error("read timeout reached")]
    HitReadTimeout = 14,
    #[error("write timeout reached")]
    HitWriteTimeout = 15,
    #[error("connect timeout reached")]
    HitConnectTimeout = 16,
    #[error("proxy reported general failure")]
    ProxyGeneralFailure = 17,
    #[error("proxy reports target network unreachable")]
    TargetProxyNetUnreachable = 18,
    #[error("proxy reports target host unreachable")]
    TargetProxyHostUnreachable = 19,
    #[error("proxy reports target refused connection")]
    TargetProxyConnRefused = 20,
    #[error("proxy reports TTL expired")]
    TargetProxyTtlExpired = 21,
    #[error("proxy does not support the command")]
    ProxyCommandNotSupported = 22,
    #[error("proxy does not support the address type")]
    ProxyAddressTypeNotSupported = 23,
    #[error("connection closed by peer")]
    PeerClosed = 24,
}

impl ErrorCode {
    const ALL: [ErrorCode; 25] = [
        ErrorCode::NoError,
        ErrorCode::Null,
        ErrorCode::ExceedProxyLimit,
        ErrorCode::NoTls,
        ErrorCode::NoSocket,
        ErrorCode::HitTimeout,
        ErrorCode::OutOfBuffer,
        ErrorCode::TlsGeneric,
        ErrorCode::Socks4NoAuth,
        ErrorCode::Socks5AuthExceedSize,
        ErrorCode::Socks4NoIp6,
        ErrorCode::ProxyUnexpectedResponse,
        ErrorCode::TargetProxyConnectFailed,
        ErrorCode::ProxyAuthFailed,
        ErrorCode::HitReadTimeout,
        ErrorCode::HitWriteTimeout,
        ErrorCode::HitConnectTimeout,
        ErrorCode::ProxyGeneralFailure,
        ErrorCode::TargetProxyNetUnreachable,
        ErrorCode::TargetProxyHostUnreachable,
        ErrorCode::TargetProxyConnRefused,
        ErrorCode::TargetProxyTtlExpired,
        ErrorCode::ProxyCommandNotSupported,
        ErrorCode::ProxyAddressTypeNotSupported,
        ErrorCode::PeerClosed,
    ];

    /// Look a raw own-origin code up. Out-of-range values have no entry.
    #[must_use]
    pub fn from_raw(code: i32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    #[must_use]
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    /// Message for a raw own-origin code, `None` when out of range.
    #[must_use]
    pub fn message_for(code: i32) -> Option<String> {
        Self::from_raw(code).map(|c| c.to_string())
    }
}
