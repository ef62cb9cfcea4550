use clap::{Arg, ArgAction, Command};
use anyhow::Result;
use colored::*;

use ekko::commands;
use ekko::core::config::Config;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let matches = build_cli().get_matches();

    if matches.get_flag("version") {
        println!("ekko version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = Config::from_env()?;

    match matches.subcommand() {
        Some(("tui", sub_matches)) => commands::tui::execute(sub_matches, config)?,
        Some(("sample", sub_matches)) => commands::sample::execute(sub_matches, config)?,
        // No subcommand starts the dashboard with environment settings
        _ => commands::tui::execute(&matches, config)?,
    }

    Ok(())
}

fn build_cli() -> Command {
    Command::new("ekko")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Terminal control plane with a live system resource dashboard")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue)
        )
        .subcommand(
            Command::new("tui")
                .about("Open the dashboard (default)")
                .args(monitor_args())
                .arg(
                    Arg::new("load-delay")
                        .long("load-delay")
                        .value_name("MS")
                        .help("Simulated view load delay in milliseconds")
                        .value_parser(clap::value_parser!(u64))
                )
                .arg(
                    Arg::new("log-file")
                        .long("log-file")
                        .value_name("PATH")
                        .help("Write diagnostic logs to this file")
                )
        )
        .subcommand(
            Command::new("sample")
                .about("Print resource samples without the TUI")
                .args(monitor_args())
                .arg(
                    Arg::new("count")
                        .short('n')
                        .long("count")
                        .value_name("N")
                        .help("Stop after N samples (default: run until interrupted)")
                        .value_parser(clap::value_parser!(u64).range(1..))
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print one JSON object per sample")
                        .action(ArgAction::SetTrue)
                )
        )
}

fn monitor_args() -> Vec<Arg> {
    vec![
        Arg::new("interval")
            .short('i')
            .long("interval")
            .value_name("MS")
            .help("Sampling interval in milliseconds")
            .value_parser(clap::value_parser!(u64)),
        Arg::new("disk")
            .short('d')
            .long("disk")
            .value_name("PATH")
            .help("Path whose filesystem is reported as DISK"),
    ]
}
