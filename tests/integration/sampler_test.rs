use std::time::{Duration, Instant};

use ekko::core::config::Config;
use ekko::core::system_monitor::{
    FakeSource, MetricSampler, MetricSource, NetCounters, RateCalculator, DISK_ERROR_SENTINEL,
};
use ekko::EkkoError;

#[test]
fn test_first_tick_has_no_rate_second_tick_does() {
    let mut sampler = MetricSampler::new(FakeSource::default(), &Config::default());
    let start = Instant::now();

    sampler.sample_at(start).unwrap();
    assert!(sampler.rate().is_none());

    sampler.source_mut().set_network(2048, 4096);
    sampler.sample_at(start + Duration::from_secs(2)).unwrap();

    let rate = sampler.rate().unwrap();
    assert_eq!(rate.sent_rate_kbps, 1.0);
    assert_eq!(rate.recv_rate_kbps, 2.0);
}

#[test]
fn test_counter_reset_yields_zero_rate() {
    let mut rate = RateCalculator::new();
    let start = Instant::now();

    rate.update(NetCounters { bytes_sent: 10_000, bytes_recv: 10_000 }, start);
    let sample = rate
        .update(NetCounters { bytes_sent: 5, bytes_recv: 5 }, start + Duration::from_secs(1))
        .unwrap();

    assert_eq!(sample.sent_rate_kbps, 0.0);
    assert_eq!(sample.recv_rate_kbps, 0.0);
}

#[test]
fn test_missing_disk_path_degrades_only_disk() {
    let config = Config {
        disk_path: "/nonexistent".into(),
        ..Default::default()
    };
    let mut sampler = MetricSampler::new(FakeSource::default(), &config);

    let sample = sampler.sample().unwrap();
    assert_eq!(sample.disk_pct, DISK_ERROR_SENTINEL);
    assert!(!sample.disk_available());
    assert_eq!(sample.cpu_pct, 12.5);
}

#[test]
fn test_cpu_failure_fails_tick() {
    let mut sampler = MetricSampler::new(FakeSource::default(), &Config::default());
    sampler.source_mut().cpu = None;

    let err = sampler.sample().unwrap_err();
    assert!(matches!(err, EkkoError::MetricCollection(_)));
}

#[test]
fn test_boxed_source_is_a_source() {
    let mut source: Box<FakeSource> = Box::default();
    assert_eq!(source.cpu_percent().unwrap(), 12.5);
}
