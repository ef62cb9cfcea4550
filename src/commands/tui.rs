//! Dashboard command handler.
//!
//! Provides the live resource dashboard in a TUI.

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::config::Config;
use crate::core::system_monitor::SysinfoSource;
use crate::ui::monitor_tui::run_dashboard_app;

/// Execute the tui command
pub fn execute(matches: &ArgMatches, mut config: Config) -> Result<()> {
    super::apply_overrides(matches, &mut config)?;

    let log_path = config.log_file_path()?;
    crate::init_file_logging(&config, &log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    log::info!("--- Starting Ekko TUI ---");
    log::debug!("Config: {:?}", config);

    let source = SysinfoSource::probe().context("System metrics are unavailable")?;

    // Wait for CPU measurement interval
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);

    let reason = run_dashboard_app(source, &config, Some(log_path))
        .context("Failed to run dashboard")?;

    log::info!("--- Ekko TUI exited: {} ---", reason);
    println!("{}", reason);

    Ok(())
}
