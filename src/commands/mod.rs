// Command handlers module
pub mod sample;
pub mod tui;

use anyhow::{Context, Result};
use clap::ArgMatches;
use std::path::PathBuf;

use crate::core::config::Config;

/// Apply command-line flags on top of the environment-derived config.
///
/// Flags a subcommand does not define are skipped.
pub fn apply_overrides(matches: &ArgMatches, config: &mut Config) -> Result<()> {
    if let Some(interval) = matches.try_get_one::<u64>("interval").ok().flatten() {
        config.monitor_interval_ms = *interval;
    }
    if let Some(disk) = matches.try_get_one::<String>("disk").ok().flatten() {
        config.disk_path = PathBuf::from(disk);
    }
    if let Some(delay) = matches.try_get_one::<u64>("load-delay").ok().flatten() {
        config.load_delay_ms = *delay;
    }
    if let Some(path) = matches.try_get_one::<String>("log-file").ok().flatten() {
        config.log_file = Some(PathBuf::from(path));
    }

    config.validate().context("Invalid configuration")?;
    Ok(())
}
