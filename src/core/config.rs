//! Startup configuration.
//!
//! Built once in `main` from defaults, `EKKO_*` environment variables and
//! command-line overrides, then passed by reference to the sampler, the
//! dashboard renderer and the view controller.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{EkkoError, Result};

pub const ENV_LOG_LEVEL: &str = "EKKO_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "EKKO_LOG_FILE";
pub const ENV_MONITOR_INTERVAL_MS: &str = "EKKO_MONITOR_INTERVAL_MS";
pub const ENV_DISK_PATH: &str = "EKKO_DISK_PATH";
pub const ENV_LOAD_DELAY_MS: &str = "EKKO_LOAD_DELAY_MS";
pub const ENV_WARN_THRESHOLD: &str = "EKKO_WARN_THRESHOLD";
pub const ENV_CRITICAL_THRESHOLD: &str = "EKKO_CRITICAL_THRESHOLD";

const MIN_INTERVAL_MS: u64 = 100;
const MAX_LOAD_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Where the TUI writes its diagnostic log. `None` means the data-dir default.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default = "default_interval_ms")]
    pub monitor_interval_ms: u64,
    #[serde(default = "default_disk_path")]
    pub disk_path: PathBuf,
    /// Simulated work performed when a view is shown.
    #[serde(default = "default_load_delay_ms")]
    pub load_delay_ms: u64,
    #[serde(default = "default_warn_threshold")]
    pub warn_threshold: f32,
    #[serde(default = "default_critical_threshold")]
    pub critical_threshold: f32,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_interval_ms() -> u64 {
    2000
}

fn default_disk_path() -> PathBuf {
    PathBuf::from("/")
}

fn default_load_delay_ms() -> u64 {
    500
}

fn default_warn_threshold() -> f32 {
    70.0
}

fn default_critical_threshold() -> f32 {
    90.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: None,
            monitor_interval_ms: default_interval_ms(),
            disk_path: default_disk_path(),
            load_delay_ms: default_load_delay_ms(),
            warn_threshold: default_warn_threshold(),
            critical_threshold: default_critical_threshold(),
        }
    }
}

impl Config {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns for each `EKKO_*` key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level = level.trim().to_lowercase();
        }
        if let Some(path) = lookup(ENV_LOG_FILE).filter(|p| !p.trim().is_empty()) {
            config.log_file = Some(PathBuf::from(path.trim()));
        }
        if let Some(path) = lookup(ENV_DISK_PATH).filter(|p| !p.trim().is_empty()) {
            config.disk_path = PathBuf::from(path.trim());
        }
        if let Some(raw) = lookup(ENV_MONITOR_INTERVAL_MS) {
            config.monitor_interval_ms = parse_var(ENV_MONITOR_INTERVAL_MS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_LOAD_DELAY_MS) {
            config.load_delay_ms = parse_var(ENV_LOAD_DELAY_MS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_WARN_THRESHOLD) {
            config.warn_threshold = parse_var(ENV_WARN_THRESHOLD, &raw)?;
        }
        if let Some(raw) = lookup(ENV_CRITICAL_THRESHOLD) {
            config.critical_threshold = parse_var(ENV_CRITICAL_THRESHOLD, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.monitor_interval_ms < MIN_INTERVAL_MS {
            return Err(EkkoError::config(format!(
                "monitor interval must be at least {}ms (got {}ms)",
                MIN_INTERVAL_MS, self.monitor_interval_ms
            )));
        }
        if self.load_delay_ms > MAX_LOAD_DELAY_MS {
            return Err(EkkoError::config(format!(
                "load delay must be at most {}ms (got {}ms)",
                MAX_LOAD_DELAY_MS, self.load_delay_ms
            )));
        }
        if !(self.warn_threshold >= 0.0 && self.warn_threshold < self.critical_threshold) {
            return Err(EkkoError::config(format!(
                "thresholds must satisfy 0 <= warn < critical (got warn={}, critical={})",
                self.warn_threshold, self.critical_threshold
            )));
        }
        if log::LevelFilter::from_str(&self.log_level).is_err() {
            return Err(EkkoError::config(format!(
                "unknown log level '{}'",
                self.log_level
            )));
        }
        Ok(())
    }

    pub fn monitor_interval(&self) -> Duration {
        Duration::from_millis(self.monitor_interval_ms)
    }

    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        log::LevelFilter::from_str(&self.log_level).unwrap_or(log::LevelFilter::Info)
    }

    /// Log file path, falling back to `<data dir>/ekko/debug.log`.
    pub fn log_file_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.log_file {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| EkkoError::config("Could not determine data directory"))?;

        Ok(data_dir.join("ekko").join("debug.log"))
    }
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| EkkoError::config(format!("{} has an invalid value: '{}'", key, raw)))
}
