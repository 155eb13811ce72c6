//! Monitor command handler.
//!
//! Provides real-time host metrics in a TUI dashboard.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::config::{ensure_settings_file, Settings};
use crate::core::system_monitor::SensorSet;
use crate::ui::monitor_tui::{run_monitor_app, MonitorAppConfig};

/// Command-line overrides for the dashboard
#[derive(Debug, Clone, Copy, Default)]
pub struct MonitorOptions {
    pub interval_ms: Option<u64>,
    pub compact: bool,
}

impl MonitorOptions {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            interval_ms: matches.get_one::<u64>("interval-ms").copied(),
            compact: matches.get_flag("compact"),
        }
    }
}

/// Execute the monitor command
pub fn execute(matches: &ArgMatches, settings_path: &Path) -> Result<()> {
    run(MonitorOptions::from_matches(matches), settings_path)
}

pub fn run(options: MonitorOptions, settings_path: &Path) -> Result<()> {
    if let Err(e) = ensure_settings_file(settings_path) {
        log::warn!("Could not prepare settings file: {}", e);
    }
    let mut settings = Settings::load_from(settings_path);

    if let Some(interval) = options.interval_ms {
        settings.refresh_interval_ms = interval;
    }

    let config = MonitorAppConfig {
        start_compact: options.compact,
        ..Default::default()
    };

    let sensors = Arc::new(SensorSet::system());
    run_monitor_app(sensors, &settings, config).context("Failed to run system monitor")
}
