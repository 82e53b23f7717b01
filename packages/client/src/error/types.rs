use std::fmt;
use std::panic::Location;

use super::codes::ErrorCode;

/// A Result alias where the Err case is `hopsock_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Which subsystem produced an error, and therefore how its raw code reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorOrigin {
    /// Library-defined code, see [`ErrorCode`].
    Own,
    /// OS `errno` value.
    System,
    /// `getaddrinfo` `EAI_*` value.
    Resolve,
    /// Code derived from the TLS library error.
    Tls,
}

/// Everything known about a failed operation.
///
/// The same value is returned to the caller and recorded as the
/// connection's last error.
#[derive(Clone, PartialEq, Eq)]
pub struct Error {
    pub(crate) origin: ErrorOrigin,
    pub(crate) code: i32,
    pub(crate) location: &'static Location<'static>,
    pub(crate) message: Option<String>,
    pub(crate) failed_proxy: Option<usize>,
    pub(crate) transferred: usize,
}

impl Error {
    /// Raw constructor; prefer the origin-specific ones in `constructors`.
    #[track_caller]
    pub(crate) fn new(origin: ErrorOrigin, code: i32, message: Option<String>) -> Self {
        Error {
            origin,
            code,
            location: Location::caller(),
            message,
            failed_proxy: None,
            transferred: 0,
        }
    }

    /// Attribute the failure to proxy hop `index` (zero-based).
    #[must_use]
    pub fn with_failed_proxy(mut self, index: usize) -> Self {
        self.failed_proxy = Some(index);
        self
    }

    #[must_use]
    pub(crate) fn with_transferred(mut self, bytes: usize) -> Self {
        self.transferred = bytes;
        self
    }

    #[must_use]
    pub fn origin(&self) -> ErrorOrigin {
        self.origin
    }

    /// Raw code; its meaning depends on [`Error::origin`].
    #[must_use]
    pub fn code(&self) -> i32 {
        self.code
    }

    /// The library code, when this is an own-origin error.
    #[must_use]
    pub fn own_code(&self) -> Option<ErrorCode> {
        match self.origin {
            ErrorOrigin::Own => ErrorCode::from_raw(self.code),
            _ => None,
        }
    }

    /// Source file of the call site that raised the error.
    #[must_use]
    pub fn file(&self) -> &'static str {
        self.location.file()
    }

    /// Source line of the call site that raised the error.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.location.line()
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Zero-based index of the proxy hop that failed, `None` for direct
    /// connections and failures outside the proxy stage.
    #[must_use]
    pub fn failed_proxy(&self) -> Option<usize> {
        self.failed_proxy
    }

    /// Bytes moved by the I/O operation before it failed.
    #[must_use]
    pub fn bytes_transferred(&self) -> usize {
        self.transferred
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("hopsock::Error");

        f.field("origin", &self.origin);
        f.field("code", &self.code);
        f.field("location", &format_args!("{}:{}", self.file(), self.line()));

        if let Some(ref message) = self.message {
            f.field("message", message);
        }

        if let Some(hop) = self.failed_proxy {
            f.field("failed_proxy", &hop);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.origin {
            ErrorOrigin::Own => "error",
            ErrorOrigin::System => "system error",
            ErrorOrigin::Resolve => "resolve error",
            ErrorOrigin::Tls => "TLS error",
        };
        match self.message {
            Some(ref message) => write!(f, "{prefix} {}: {message}", self.code)?,
            None => write!(f, "{prefix} {}", self.code)?,
        }
        if let Some(hop) = self.failed_proxy {
            write!(f, " (proxy #{hop})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}
