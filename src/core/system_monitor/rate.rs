//! Rate derivation from cumulative network counters.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::metrics::NetCounters;

/// Polls closer together than this are ignored for rate purposes.
pub const MIN_RATE_INTERVAL: Duration = Duration::from_millis(100);

const BYTES_PER_KB: f64 = 1024.0;

/// Network throughput derived from two counter readings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RateSample {
    pub sent_rate_kbps: f64,
    pub recv_rate_kbps: f64,
}

/// The previous reading a rate is measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateWindow {
    pub prev_net_sent: u64,
    pub prev_net_recv: u64,
    pub prev_timestamp: Instant,
}

/// Turns successive cumulative counters into kB/s.
///
/// Holds one `RateWindow` and the last emitted rate, nothing else.
#[derive(Debug, Clone, Default)]
pub struct RateCalculator {
    window: Option<RateWindow>,
    last: Option<RateSample>,
}

impl RateCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a new reading taken at `now`.
    ///
    /// Returns `None` until two readings more than `MIN_RATE_INTERVAL` apart
    /// exist. A reading that arrives too soon leaves the window alone and
    /// returns the previously emitted rate.
    pub fn update(&mut self, counters: NetCounters, now: Instant) -> Option<RateSample> {
        let Some(window) = self.window else {
            self.window = Some(RateWindow::at(counters, now));
            return None;
        };

        let elapsed = now.saturating_duration_since(window.prev_timestamp);
        if elapsed <= MIN_RATE_INTERVAL {
            return self.last;
        }
        let elapsed_secs = elapsed.as_secs_f64();

        // A counter that went backwards was reset; count no traffic for it.
        let sent_delta = counters.bytes_sent.checked_sub(window.prev_net_sent);
        let recv_delta = counters.bytes_recv.checked_sub(window.prev_net_recv);
        if sent_delta.is_none() || recv_delta.is_none() {
            log::debug!("Network counter reset detected, treating delta as 0");
        }

        let rate = RateSample {
            sent_rate_kbps: sent_delta.unwrap_or(0) as f64 / elapsed_secs / BYTES_PER_KB,
            recv_rate_kbps: recv_delta.unwrap_or(0) as f64 / elapsed_secs / BYTES_PER_KB,
        };

        self.window = Some(RateWindow::at(counters, now));
        self.last = Some(rate);
        Some(rate)
    }

    /// Last emitted rate, if any.
    pub fn last(&self) -> Option<RateSample> {
        self.last
    }

    pub fn window(&self) -> Option<&RateWindow> {
        self.window.as_ref()
    }
}

impl RateWindow {
    fn at(counters: NetCounters, now: Instant) -> Self {
        Self {
            prev_net_sent: counters.bytes_sent,
            prev_net_recv: counters.bytes_recv,
            prev_timestamp: now,
        }
    }
}
