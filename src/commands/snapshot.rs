//! One-shot metrics output for scripting.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::Serialize;

use crate::core::config::Settings;
use crate::core::system_monitor::{
    render_full, summarize, CompactSummary, MetricsAggregator, PollSnapshot, SensorSet,
};

/// JSON document printed by `hostmon snapshot --json`
#[derive(Debug, Serialize)]
pub struct SnapshotReport {
    pub lines: Vec<String>,
    pub summary: CompactSummary,
    pub metrics: PollSnapshot,
}

impl SnapshotReport {
    /// Both views rendered from the same poll
    pub fn from_snapshot(snapshot: PollSnapshot) -> Self {
        Self {
            lines: render_full(&snapshot)
                .into_iter()
                .map(|line| line.text)
                .collect(),
            summary: summarize(&snapshot),
            metrics: snapshot,
        }
    }
}

pub fn execute(matches: &ArgMatches, settings_path: &Path) -> Result<()> {
    let settings = Settings::load_from(settings_path);
    let poll = settings.poll_config()?;

    let sensors = Arc::new(SensorSet::system());
    let aggregator = MetricsAggregator::new(Arc::clone(&sensors), poll);
    let snapshot = aggregator.sample();
    sensors.release_driver();

    let report = SnapshotReport::from_snapshot(snapshot);

    if matches.get_flag("json") {
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize snapshot")?;
        println!("{}", json);
    } else if matches.get_flag("compact") {
        for line in report.summary.lines() {
            println!("{}", line);
        }
    } else {
        for line in &report.lines {
            println!("{}", line);
        }
    }

    Ok(())
}
