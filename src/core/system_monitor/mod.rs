//! System monitoring core functionality.
//!
//! Periodic sampling of CPU, memory, disk and network readings, plus the
//! rate derivation and severity banding the dashboard renders from.

mod metrics;
mod rate;
mod sampler;
mod severity;
mod source;

pub use metrics::{
    percent_of, DiskStats, MemoryStats, NetCounters, Sample, DISK_ERROR_SENTINEL,
};
pub use rate::{RateCalculator, RateSample, RateWindow, MIN_RATE_INTERVAL};
pub use sampler::MetricSampler;
pub use severity::{Severity, SeverityBands};
pub use source::{FakeSource, MetricSource, SysinfoSource};
