// Core business logic module

pub mod config;
pub mod log_sink;
pub mod system_monitor;
pub mod views;

// Re-export commonly used items
pub use config::Config;
pub use log_sink::LogSink;
pub use views::{View, ViewController, ViewState};
