use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::core::config::Config;
use crate::error::Result;

use super::metrics::{NetCounters, Sample, DISK_ERROR_SENTINEL};
use super::rate::{RateCalculator, RateSample};
use super::source::MetricSource;

/// Polls a `MetricSource` into `Sample`s and keeps the network rate current.
///
/// Sampling is synchronous and bounded; the caller owns the timer.
pub struct MetricSampler<S> {
    source: S,
    disk_path: PathBuf,
    interval: Duration,
    rate: RateCalculator,
}

impl<S: MetricSource> MetricSampler<S> {
    pub fn new(source: S, config: &Config) -> Self {
        Self {
            source,
            disk_path: config.disk_path.clone(),
            interval: config.monitor_interval(),
            rate: RateCalculator::new(),
        }
    }

    /// Take one sample now.
    pub fn sample(&mut self) -> Result<Sample> {
        self.sample_at(Instant::now())
    }

    /// Take one sample stamped with `now`.
    ///
    /// Every metric is read even when an earlier one fails. CPU and memory
    /// failures fail the tick; disk and network failures only degrade their
    /// own fields.
    pub fn sample_at(&mut self, now: Instant) -> Result<Sample> {
        let cpu = self.source.cpu_percent();
        let memory = self.source.memory_stats();

        let (disk_total_bytes, disk_used_bytes, disk_pct) =
            match self.source.disk_stats(&self.disk_path) {
                Ok(disk) => (disk.total, disk.used, disk.percent),
                Err(e) => {
                    log::warn!("Disk {} unavailable: {}", self.disk_path.display(), e);
                    (0, 0, DISK_ERROR_SENTINEL)
                }
            };

        let net = match self.source.network_counters() {
            Ok(counters) => {
                self.rate.update(counters, now);
                counters
            }
            Err(e) => {
                log::warn!("Network counters unavailable: {}", e);
                NetCounters::default()
            }
        };

        let cpu_pct = cpu?;
        let memory = memory?;

        log::debug!(
            "Stats: CPU={:.1} Mem={:.1} Disk={:.1}",
            cpu_pct,
            memory.percent,
            disk_pct
        );

        Ok(Sample {
            timestamp: now,
            captured_at: chrono::Utc::now(),
            cpu_pct,
            mem_total_bytes: memory.total,
            mem_avail_bytes: memory.available,
            mem_pct: memory.percent,
            disk_total_bytes,
            disk_used_bytes,
            disk_pct,
            net_sent_bytes: net.bytes_sent,
            net_recv_bytes: net.bytes_recv,
        })
    }

    /// Most recent network rate, `None` until two usable readings exist.
    pub fn rate(&self) -> Option<RateSample> {
        self.rate.last()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn disk_path(&self) -> &Path {
        &self.disk_path
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::system_monitor::FakeSource;
    use crate::error::EkkoError;

    fn sampler_with(source: FakeSource) -> MetricSampler<FakeSource> {
        MetricSampler::new(source, &Config::default())
    }

    #[test]
    fn test_full_sample() {
        let mut sampler = sampler_with(FakeSource::default());
        let sample = sampler.sample().unwrap();

        assert_eq!(sample.cpu_pct, 12.5);
        assert_eq!(sample.mem_pct, 25.0);
        assert_eq!(sample.disk_pct, 40.0);
        assert!(sample.disk_available());
        assert_eq!(sample.mem_used_bytes(), 2 * 1024 * 1024 * 1024);
    }

    #[test]
    fn test_invalid_disk_path_only_degrades_disk() {
        let source = FakeSource {
            disk_path: PathBuf::from("/mnt/elsewhere"),
            ..Default::default()
        };
        let mut sampler = sampler_with(source);
        let sample = sampler.sample().unwrap();

        assert_eq!(sample.disk_pct, DISK_ERROR_SENTINEL);
        assert!(!sample.disk_available());
        assert_eq!(sample.cpu_pct, 12.5);
        assert_eq!(sample.mem_pct, 25.0);
    }

    #[test]
    fn test_cpu_failure_fails_tick_but_rate_still_advances() {
        let mut sampler = sampler_with(FakeSource::default());
        let t0 = Instant::now();
        sampler.sample_at(t0).unwrap();

        sampler.source_mut().cpu = None;
        sampler.source_mut().set_network(2048, 0);
        let err = sampler.sample_at(t0 + Duration::from_secs(2)).unwrap_err();

        assert!(matches!(err, EkkoError::MetricCollection(_)));
        assert_eq!(sampler.rate().unwrap().sent_rate_kbps, 1.0);
    }

    #[test]
    fn test_memory_failure_fails_tick() {
        let source = FakeSource {
            memory: None,
            ..Default::default()
        };
        let mut sampler = sampler_with(source);
        assert!(sampler.sample().is_err());
    }

    #[test]
    fn test_network_failure_keeps_previous_rate() {
        let mut sampler = sampler_with(FakeSource::default());
        let t0 = Instant::now();

        sampler.sample_at(t0).unwrap();
        sampler.source_mut().set_network(4096, 4096);
        sampler.sample_at(t0 + Duration::from_secs(2)).unwrap();
        let before = sampler.rate();

        sampler.source_mut().network = None;
        let sample = sampler.sample_at(t0 + Duration::from_secs(4)).unwrap();

        assert_eq!(sample.net_sent_bytes, 0);
        assert_eq!(sampler.rate(), before);
    }

    #[test]
    fn test_interval_and_disk_path_come_from_config() {
        let config = Config {
            monitor_interval_ms: 750,
            disk_path: PathBuf::from("/data"),
            ..Default::default()
        };
        let sampler = MetricSampler::new(FakeSource::default(), &config);
        assert_eq!(sampler.interval(), Duration::from_millis(750));
        assert_eq!(sampler.disk_path(), Path::new("/data"));
    }
}
