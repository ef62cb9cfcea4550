// Ekko Library - Public API

// Re-export error types
pub mod error;
pub use error::{EkkoError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod ui;

// Re-export commonly used types
pub use core::config::Config;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Initialize logging to stderr
pub fn init_logging(config: &Config) -> Result<()> {
    logger_builder(config)
        .try_init()
        .map_err(|e| EkkoError::config(format!("Failed to initialize logging: {}", e)))
}

/// Initialize logging to an append-only file, for when the TUI owns the terminal
pub fn init_file_logging(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    logger_builder(config)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .write_style(env_logger::WriteStyle::Never)
        .try_init()
        .map_err(|e| EkkoError::config(format!("Failed to initialize logging: {}", e)))
}

// Level from config; RUST_LOG still wins when set.
fn logger_builder(config: &Config) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(config.log_level_filter())
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}:{} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                record.line().unwrap_or(0),
                record.args()
            )
        });
    builder
}
