// Core logic: settings, the metrics pipeline and capture helpers

pub mod capture;
pub mod config;
pub mod system_monitor;

pub use capture::{ScreenRecorder, Screenshot};
pub use config::{PollConfig, Settings};
