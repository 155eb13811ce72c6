use std::sync::Arc;

use crate::core::config::PollConfig;

use super::format::{format_number, round_to};
use super::metrics::{CompactSummary, PollSnapshot};
use super::sensors::{PollScope, SensorSet};

/// Literal shown in the compact view when there is no GPU reading
pub const GPU_NO_INFO: &str = "GPU: no info";

/// Compact view for constrained display space: average CPU load, GPU usage
/// and memory in GB. Shares its sensors with the full view.
pub struct CompactAggregator {
    sensors: Arc<SensorSet>,
    config: PollConfig,
}

impl CompactAggregator {
    pub fn new(sensors: Arc<SensorSet>, config: PollConfig) -> Self {
        Self { sensors, config }
    }

    /// Poll only what the summary needs. Blocks for the CPU sampling interval.
    pub fn sample(&self) -> PollSnapshot {
        self.sensors.poll(&self.config, PollScope::Compact)
    }

    pub fn collect_summary(&self) -> CompactSummary {
        summarize(&self.sample())
    }
}

/// Build the compact summary from a snapshot. Works on full snapshots too.
pub fn summarize(snapshot: &PollSnapshot) -> CompactSummary {
    CompactSummary {
        avg_cpu_load: format!(
            "AVG CPU: {}%",
            format_number(average_load(&snapshot.cpu_loads))
        ),
        gpu_usage: match snapshot.gpu.and_then(|g| g.usage_percent) {
            Some(usage) => format!("GPU: {}%", usage),
            None => GPU_NO_INFO.to_string(),
        },
        mem_usage: match snapshot.memory {
            Some(memory) => format!(
                "RAM: {} GB / {} GB",
                format_number(round_to(memory.used_gb(), 2)),
                format_number(round_to(memory.total_gb(), 2)),
            ),
            None => "RAM: no info".to_string(),
        },
    }
}

/// Arithmetic mean of the per-core loads rounded to two decimals; 0.0 with no cores
pub fn average_load(loads: &[f32]) -> f64 {
    if loads.is_empty() {
        return 0.0;
    }
    let sum: f64 = loads.iter().map(|l| f64::from(*l)).sum();
    round_to(sum / loads.len() as f64, 2)
}
