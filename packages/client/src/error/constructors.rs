use std::io;

use super::codes::ErrorCode;
use super::types::{Error, ErrorOrigin};

impl Error {
    /// Creates an own-origin `Error` for a library code.
    #[track_caller]
    pub fn own(code: ErrorCode) -> Error {
        Error::new(ErrorOrigin::Own, code.as_raw(), ErrorCode::message_for(code.as_raw()))
    }

    /// Creates a system-origin `Error` for a raw `errno` value.
    #[track_caller]
    pub fn errno(code: i32) -> Error {
        let message = io::Error::from_raw_os_error(code).to_string();
        Error::new(ErrorOrigin::System, code, Some(message))
    }

    /// Creates a system-origin `Error` from an I/O error.
    ///
    /// Errors without an OS code keep their own text and report code 0.
    #[track_caller]
    pub fn system(err: &io::Error) -> Error {
        match err.raw_os_error() {
            Some(code) => Error::errno(code),
            None => Error::new(ErrorOrigin::System, 0, Some(err.to_string())),
        }
    }

    /// Creates a resolve-origin `Error` for a `getaddrinfo` return value.
    #[track_caller]
    pub fn resolve(code: i32) -> Error {
        Error::new(ErrorOrigin::Resolve, code, Some(gai_message(code)))
    }

    /// Creates a TLS-origin `Error` from a rustls failure.
    #[cfg(feature = "__rustls")]
    #[track_caller]
    pub fn tls(err: &rustls::Error) -> Error {
        Error::new(
            ErrorOrigin::Tls,
            crate::tls::errors::error_code(err),
            Some(err.to_string()),
        )
    }
}

/// Translate an I/O failure on the data path.
///
/// Would-block and timed-out results become `timeout_code`, failures the TLS
/// layer wrapped into the I/O error keep their TLS origin, everything else is
/// a system error.
#[track_caller]
pub(crate) fn io_failure(err: &io::Error, timeout_code: ErrorCode) -> Error {
    #[cfg(feature = "__rustls")]
    if let Some(tls_err) = err
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<rustls::Error>())
    {
        return Error::tls(tls_err);
    }

    match err.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => Error::own(timeout_code),
        _ => Error::system(err),
    }
}

fn gai_message(code: i32) -> String {
    // SAFETY: gai_strerror returns a pointer to a static NUL-terminated string.
    let ptr = unsafe { libc::gai_strerror(code) };
    if ptr.is_null() {
        return format!("resolver error {code}");
    }
    unsafe { std::ffi::CStr::from_ptr(ptr) }
        .to_string_lossy()
        .into_owned()
}
