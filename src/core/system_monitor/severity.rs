//! Threshold banding for percentages shown on the dashboard.

use serde::{Deserialize, Serialize};

use crate::core::config::Config;

/// Display classification of a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reading unavailable (negative sentinel).
    Error,
    Ok,
    Warn,
    Critical,
}

impl Severity {
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Ok => "ok",
            Severity::Warn => "warn",
            Severity::Critical => "critical",
        }
    }
}

/// Warn/critical cut-offs, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityBands {
    pub warn: f32,
    pub critical: f32,
}

impl Default for SeverityBands {
    fn default() -> Self {
        Self {
            warn: 70.0,
            critical: 90.0,
        }
    }
}

impl SeverityBands {
    pub fn from_config(config: &Config) -> Self {
        Self {
            warn: config.warn_threshold,
            critical: config.critical_threshold,
        }
    }

    pub fn classify(&self, value: f32) -> Severity {
        match value {
            v if v.is_nan() || v < 0.0 => Severity::Error,
            v if v < self.warn => Severity::Ok,
            v if v < self.critical => Severity::Warn,
            _ => Severity::Critical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        let bands = SeverityBands::default();
        assert_eq!(bands.classify(-1.0), Severity::Error);
        assert_eq!(bands.classify(0.0), Severity::Ok);
        assert_eq!(bands.classify(69.9), Severity::Ok);
        assert_eq!(bands.classify(70.0), Severity::Warn);
        assert_eq!(bands.classify(89.9), Severity::Warn);
        assert_eq!(bands.classify(90.0), Severity::Critical);
        assert_eq!(bands.classify(100.0), Severity::Critical);
    }

    #[test]
    fn test_nan_is_error() {
        assert_eq!(SeverityBands::default().classify(f32::NAN), Severity::Error);
    }

    #[test]
    fn test_bands_follow_config() {
        let config = Config {
            warn_threshold: 50.0,
            critical_threshold: 60.0,
            ..Default::default()
        };
        let bands = SeverityBands::from_config(&config);
        assert_eq!(bands.classify(55.0), Severity::Warn);
        assert_eq!(bands.classify(60.0), Severity::Critical);
    }
}
