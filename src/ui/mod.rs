// UI and formatting module

pub mod dashboard;
pub mod monitor_tui;

// Re-export commonly used items for cleaner imports
pub use dashboard::{Dashboard, StyledSpan, StyledText, Tag};
