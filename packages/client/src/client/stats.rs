//! Per-connection transfer counters

/// Counters a [`Connection`](super::Connection) keeps over its lifetime.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionStats {
    /// Payload bytes written, partial transfers of failed sends included
    pub bytes_sent: u64,
    /// Payload bytes read, partial transfers of failed receives included
    pub bytes_received: u64,
    /// Connect attempts
    pub connects_total: u64,
    /// Connect attempts that did not reach the target
    pub connects_failed: u64,
}

impl ConnectionStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_sent(&mut self, bytes: usize) {
        self.bytes_sent += bytes as u64;
    }

    pub fn record_received(&mut self, bytes: usize) {
        self.bytes_received += bytes as u64;
    }

    pub fn record_connect(&mut self, succeeded: bool) {
        self.connects_total += 1;
        if !succeeded {
            self.connects_failed += 1;
        }
    }

    /// Share of connect attempts that succeeded, as a percentage.
    #[must_use]
    pub fn connect_success_rate(&self) -> f64 {
        if self.connects_total == 0 {
            return 0.0;
        }
        let succeeded = self.connects_total - self.connects_failed;
        (succeeded as f64 / self.connects_total as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_accumulate() {
        let mut stats = ConnectionStats::new();
        stats.record_sent(10);
        stats.record_sent(5);
        stats.record_received(7);
        stats.record_connect(true);
        stats.record_connect(false);
        assert_eq!(stats.bytes_sent, 15);
        assert_eq!(stats.bytes_received, 7);
        assert_eq!(stats.connects_total, 2);
        assert_eq!(stats.connects_failed, 1);
        assert!((stats.connect_success_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_rate_is_zero() {
        assert_eq!(ConnectionStats::new().connect_success_rate(), 0.0);
    }
}
