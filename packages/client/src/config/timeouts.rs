//! Builder methods for connection settings

use std::time::Duration;

use super::types::{ConnectionConfig, ResolverMode, TlsRoots};

impl ConnectionConfig {
    /// Set the timeout applied to connect, send and receive.
    ///
    /// `Duration::ZERO` disables the timeout. Sub-millisecond remainders
    /// round up to the next millisecond.
    ///
    /// # Examples
    /// ```no_run
    /// use std::time::Duration;
    /// use hopsock_client::config::ConnectionConfig;
    ///
    /// let config = ConnectionConfig::default()
    ///     .with_timeout(Duration::from_secs(5));
    /// assert_eq!(config.timeout_ms, 5000);
    /// ```
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout_to_millis(Some(timeout));
        self
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: ResolverMode) -> Self {
        self.resolver = resolver;
        self
    }

    #[must_use]
    pub fn with_tls_roots(mut self, roots: TlsRoots) -> Self {
        self.tls_roots = roots;
        self
    }

    /// The configured timeout, `None` when disabled.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        millis_to_timeout(self.timeout_ms)
    }
}

/// Map the millisecond convention (`0` = none) onto `Option<Duration>`.
#[must_use]
pub fn millis_to_timeout(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

/// Inverse of [`millis_to_timeout`]; a non-zero duration never maps to `0`.
#[must_use]
pub fn timeout_to_millis(timeout: Option<Duration>) -> u64 {
    match timeout {
        None => 0,
        Some(t) => {
            let ms = t.as_millis() + u128::from(t.subsec_nanos() % 1_000_000 != 0);
            u64::try_from(ms).unwrap_or(u64::MAX)
        }
    }
}
