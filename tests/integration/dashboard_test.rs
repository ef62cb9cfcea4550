use std::time::{Duration, Instant};

use ekko::core::config::Config;
use ekko::core::system_monitor::{FakeSource, MetricSampler, Severity};
use ekko::ui::dashboard::{Dashboard, Tag};

#[test]
fn test_first_render_shows_network_na() {
    let mut sampler = MetricSampler::new(FakeSource::default(), &Config::default());
    let sample = sampler.sample().unwrap();

    let text = Dashboard::default().render(&sample, sampler.rate().as_ref());
    let plain = text.plain();

    assert!(plain.starts_with("CPU:"));
    assert!(plain.ends_with("Net: N/A"));
}

#[test]
fn test_render_after_two_ticks_shows_rate() {
    let mut sampler = MetricSampler::new(FakeSource::default(), &Config::default());
    let start = Instant::now();
    sampler.sample_at(start).unwrap();
    sampler.source_mut().set_network(1024, 0);
    let sample = sampler.sample_at(start + Duration::from_secs(1)).unwrap();

    let text = Dashboard::default().render(&sample, sampler.rate().as_ref());
    assert!(text.plain().contains("Net: ↑   1.0 ↓   0.0 kB/s"));
}

#[test]
fn test_custom_thresholds() {
    let config = Config {
        warn_threshold: 10.0,
        critical_threshold: 20.0,
        ..Default::default()
    };
    let mut sampler = MetricSampler::new(FakeSource::default(), &config);
    let sample = sampler.sample().unwrap();

    // cpu 12.5, mem 25, disk 40
    let tags: Vec<Tag> = Dashboard::new(&config).render(&sample, None).tags().collect();
    assert_eq!(tags[0], Tag::Severity(Severity::Warn));
    assert_eq!(tags[1], Tag::Severity(Severity::Critical));
    assert_eq!(tags[2], Tag::Severity(Severity::Critical));
}
