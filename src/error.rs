use std::io;
use thiserror::Error;

/// Custom error type for Ekko
#[derive(Error, Debug)]
pub enum EkkoError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A disk path that is missing, unreadable, or not on any mounted disk.
    #[error("Disk path error: {0}")]
    Path(String),

    #[error("Metric collection failed: {0}")]
    MetricCollection(String),

    /// The host cannot provide metrics at all. Fatal at startup.
    #[error("Metric source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Unknown view: {0}")]
    UnknownView(String),

}

/// Result type alias for Ekko
pub type Result<T> = std::result::Result<T, EkkoError>;

impl EkkoError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        EkkoError::Config(msg.into())
    }

    /// Create a disk path error
    pub fn path<S: Into<String>>(msg: S) -> Self {
        EkkoError::Path(msg.into())
    }

    pub fn metric_collection<S: Into<String>>(msg: S) -> Self {
        EkkoError::MetricCollection(msg.into())
    }

    pub fn source_unavailable<S: Into<String>>(msg: S) -> Self {
        EkkoError::SourceUnavailable(msg.into())
    }

    pub fn unknown_view<S: Into<String>>(id: S) -> Self {
        EkkoError::UnknownView(id.into())
    }
}
