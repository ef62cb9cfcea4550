//! Headless sampling command.
//!
//! Runs the same sampler as the dashboard and prints each tick, either as
//! dashboard markup or as one JSON object per line (for scripting).

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::Serialize;

use crate::core::config::Config;
use crate::core::system_monitor::{MetricSampler, RateSample, Sample, SysinfoSource};
use crate::ui::dashboard::Dashboard;

#[derive(Debug, Serialize)]
struct SampleRecord<'a> {
    #[serde(flatten)]
    sample: &'a Sample,
    rate: Option<RateSample>,
}

/// Execute the sample command
pub fn execute(matches: &ArgMatches, mut config: Config) -> Result<()> {
    super::apply_overrides(matches, &mut config)?;
    crate::init_logging(&config)?;

    let count = matches.get_one::<u64>("count").copied();
    let json_output = matches.get_flag("json");

    let source = SysinfoSource::probe().context("System metrics are unavailable")?;
    let mut sampler = MetricSampler::new(source, &config);
    let dashboard = Dashboard::new(&config);

    // Initial collection
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);

    let mut taken: u64 = 0;
    loop {
        match sampler.sample() {
            Ok(sample) => {
                let line = format_tick(&dashboard, &sample, sampler.rate(), json_output)?;
                println!("{}", line);
            }
            Err(e) => log::warn!("Sampling failed: {}", e),
        }

        taken += 1;
        if count.is_some_and(|c| taken >= c) {
            break;
        }

        std::thread::sleep(sampler.interval());
    }

    Ok(())
}

/// One tick's output.
pub fn format_tick(
    dashboard: &Dashboard,
    sample: &Sample,
    rate: Option<RateSample>,
    json_output: bool,
) -> Result<String> {
    if json_output {
        let record = SampleRecord { sample, rate };
        serde_json::to_string(&record).context("Failed to serialize sample")
    } else {
        Ok(format!("{}\n", dashboard.render(sample, rate.as_ref())))
    }
}
