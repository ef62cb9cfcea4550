//! Terminal User Interface for the dashboard.
//!
//! One control loop owns all state; rendering uses ratatui.

mod app;
mod event_handler;
mod render;
mod widgets;

pub use app::{run_dashboard_app, DashboardApp, Theme, QUIT_REASON};
pub use event_handler::{map_key, AppCommand};
