//! Terminal User Interface for system monitoring.
//!
//! Polls the aggregators once per refresh tick and renders their lines.

mod app;
mod event_handler;
mod render;

pub use app::{run_monitor_app, MonitorApp, MonitorAppConfig};
pub use event_handler::{map_key, MonitorEvent};
