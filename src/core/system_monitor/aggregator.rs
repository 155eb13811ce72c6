use std::sync::Arc;

use crate::core::config::PollConfig;

use super::format::{format_number, round_to};
use super::metrics::{BatteryReading, MetricKind, PollSnapshot, ProgressLine};
use super::sensors::{PollScope, SensorSet};

/// Full view: one display line per metric, in a fixed order.
pub struct MetricsAggregator {
    sensors: Arc<SensorSet>,
    config: PollConfig,
}

impl MetricsAggregator {
    pub fn new(sensors: Arc<SensorSet>, config: PollConfig) -> Self {
        Self { sensors, config }
    }

    pub fn sensors(&self) -> &Arc<SensorSet> {
        &self.sensors
    }

    /// Poll every sensor once. Blocks for the CPU sampling interval.
    pub fn sample(&self) -> PollSnapshot {
        self.sensors.poll(&self.config, PollScope::Full)
    }

    /// Poll once and format the result for display
    pub fn collect(&self) -> Vec<ProgressLine> {
        render_full(&self.sample())
    }
}

/// Build the full-view lines from a snapshot.
///
/// Order: CPU cores (1-indexed), GPU usage, GPU frequency, CPU frequency,
/// RAM, disk usage, disk free space, battery. Metrics without a reading get
/// no line.
pub fn render_full(snapshot: &PollSnapshot) -> Vec<ProgressLine> {
    let mut lines: Vec<ProgressLine> = snapshot
        .cpu_loads
        .iter()
        .enumerate()
        .map(|(i, load)| {
            ProgressLine::new(
                MetricKind::CpuLoadPerCore,
                format!(
                    "CPU{}: {}%",
                    i + 1,
                    format_number(round_to(f64::from(*load), 1))
                ),
            )
        })
        .collect();

    if let Some(gpu) = snapshot.gpu {
        if let Some(usage) = gpu.usage_percent {
            lines.push(ProgressLine::new(
                MetricKind::GpuPercent,
                format!("GPU: {}%", usage),
            ));
        }
        if let Some(freq) = gpu.frequency_mhz {
            lines.push(ProgressLine::new(
                MetricKind::GpuFrequencyMHz,
                format!("GPU Frequency: {} MHz", format_number(freq)),
            ));
        }
    }

    if let Some(current) = snapshot.cpu_frequency_mhz {
        let current = format_number(round_to(current, 2));
        let text = match snapshot.cpu_max_frequency_mhz {
            Some(max) => format!("CPU Frequency: {} MHz / {} MHz", current, format_number(max)),
            None => format!("CPU Frequency: {} MHz", current),
        };
        lines.push(ProgressLine::new(MetricKind::CpuFrequency, text));
    }

    if let Some(memory) = snapshot.memory {
        lines.push(ProgressLine::new(
            MetricKind::MemoryPercent,
            format!(
                "RAM: {}% ({} / {} GB)",
                format_number(memory.usage_percent()),
                format_number(round_to(memory.used_gb(), 2)),
                format_number(round_to(memory.total_gb(), 2)),
            ),
        ));
    }

    if let Some(disk) = snapshot.disk {
        lines.push(ProgressLine::new(
            MetricKind::DiskPercent,
            format!("Disk: {}%", format_number(disk.usage_percent())),
        ));
        lines.push(ProgressLine::new(
            MetricKind::DiskFreeGB,
            format!("Disk Free Space: {:.2} GB", disk.free_gb()),
        ));
    }

    // Battery needs both halves of the reading; no placeholder otherwise
    if let Some(BatteryReading {
        percent: Some(percent),
        status: Some(status),
    }) = snapshot.battery
    {
        lines.push(ProgressLine::new(
            MetricKind::BatteryPercent,
            format!(
                "Battery: {}% - {}",
                format_number(round_to(percent, 1)),
                status
            ),
        ));
    }

    lines
}
