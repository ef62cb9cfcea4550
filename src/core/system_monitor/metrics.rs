use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Percentage shown when the disk path could not be read.
pub const DISK_ERROR_SENTINEL: f32 = -1.0;

/// One tick's full snapshot of resource metrics.
#[derive(Debug, Clone, Serialize)]
pub struct Sample {
    /// Monotonic capture instant, used for rate derivation.
    #[serde(skip)]
    pub timestamp: Instant,
    pub captured_at: DateTime<Utc>,
    pub cpu_pct: f32,
    pub mem_total_bytes: u64,
    pub mem_avail_bytes: u64,
    pub mem_pct: f32,
    pub disk_total_bytes: u64,
    pub disk_used_bytes: u64,
    /// `DISK_ERROR_SENTINEL` when the disk path failed this tick.
    pub disk_pct: f32,
    pub net_sent_bytes: u64,
    pub net_recv_bytes: u64,
}

impl Sample {
    pub fn disk_available(&self) -> bool {
        self.disk_pct >= 0.0
    }

    pub fn mem_used_bytes(&self) -> u64 {
        self.mem_total_bytes.saturating_sub(self.mem_avail_bytes)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total: u64,
    pub available: u64,
    pub percent: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskStats {
    pub total: u64,
    pub used: u64,
    pub percent: f32,
}

/// Cumulative network byte counters summed over every interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetCounters {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

/// Percentage of `part` in `total`, 0 when `total` is 0.
pub fn percent_of(part: u64, total: u64) -> f32 {
    if total > 0 {
        (part as f64 / total as f64 * 100.0) as f32
    } else {
        0.0
    }
}
