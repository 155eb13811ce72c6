use std::fmt;

use serde::{Deserialize, Serialize};

use super::format::{bytes_to_gb, round_to};

/// Identifies which metric a sample or display line refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    CpuLoadPerCore,
    CpuFrequency,
    MemoryPercent,
    MemoryUsedGB,
    MemoryTotalGB,
    DiskPercent,
    DiskFreeGB,
    GpuPercent,
    GpuFrequencyMHz,
    BatteryPercent,
    BatteryStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatteryStatus {
    Charging,
    Discharging,
}

impl fmt::Display for BatteryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatteryStatus::Charging => f.write_str("Charging"),
            BatteryStatus::Discharging => f.write_str("Discharging"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MetricValue {
    Number(f64),
    Battery(BatteryStatus),
}

/// One metric reading taken at one poll instant.
///
/// An unavailable sample carries no value at all, so there is nothing for a
/// consumer to misread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub kind: MetricKind,
    pub value: Option<MetricValue>,
}

impl MetricSample {
    pub fn number(kind: MetricKind, value: Option<f64>) -> Self {
        Self {
            kind,
            value: value.map(MetricValue::Number),
        }
    }

    pub fn is_available(&self) -> bool {
        self.value.is_some()
    }
}

/// Memory reading in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub used_bytes: u64,
    pub total_bytes: u64,
}

impl MemoryUsage {
    pub fn usage_percent(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        round_to(
            self.used_bytes as f64 / self.total_bytes as f64 * 100.0,
            1,
        )
    }

    pub fn used_gb(&self) -> f64 {
        bytes_to_gb(self.used_bytes)
    }

    pub fn total_gb(&self) -> f64 {
        bytes_to_gb(self.total_bytes)
    }
}

/// Usage of the root filesystem taken from a single query.
///
/// `free_bytes` is what an unprivileged user can still write. Blocks reserved
/// for root count as neither used nor free, so `used + free` may be less than
/// `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiskUsage {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
}

impl DiskUsage {
    /// Percent of the user-visible space in use, the figure `df` reports
    pub fn usage_percent(&self) -> f64 {
        let visible = self.used_bytes.saturating_add(self.free_bytes);
        if visible == 0 {
            return 0.0;
        }
        round_to(self.used_bytes as f64 / visible as f64 * 100.0, 1)
    }

    pub fn free_gb(&self) -> f64 {
        bytes_to_gb(self.free_bytes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryReading {
    pub percent: Option<f64>,
    pub status: Option<BatteryStatus>,
}

/// GPU values of one poll. `None` means the driver gave no reading, which is
/// distinct from a real 0% reading.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GpuReading {
    pub usage_percent: Option<u32>,
    pub frequency_mhz: Option<f64>,
}

/// Everything one poll measured. Both the full and compact views render from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PollSnapshot {
    pub timestamp: i64,
    pub cpu_loads: Vec<f32>,
    pub cpu_frequency_mhz: Option<f64>,
    pub cpu_max_frequency_mhz: Option<f64>,
    pub memory: Option<MemoryUsage>,
    pub disk: Option<DiskUsage>,
    /// `None` when the availability checker reported no supported GPU
    pub gpu: Option<GpuReading>,
    pub battery: Option<BatteryReading>,
}

impl PollSnapshot {
    /// Flatten the snapshot into typed samples, one per core for CPU load.
    pub fn samples(&self) -> Vec<MetricSample> {
        let mut samples: Vec<MetricSample> = self
            .cpu_loads
            .iter()
            .map(|load| MetricSample::number(MetricKind::CpuLoadPerCore, Some(f64::from(*load))))
            .collect();

        samples.push(MetricSample::number(MetricKind::CpuFrequency, self.cpu_frequency_mhz));
        samples.push(MetricSample::number(
            MetricKind::MemoryPercent,
            self.memory.map(|m| m.usage_percent()),
        ));
        samples.push(MetricSample::number(
            MetricKind::MemoryUsedGB,
            self.memory.map(|m| m.used_gb()),
        ));
        samples.push(MetricSample::number(
            MetricKind::MemoryTotalGB,
            self.memory.map(|m| m.total_gb()),
        ));
        samples.push(MetricSample::number(
            MetricKind::DiskPercent,
            self.disk.map(|d| d.usage_percent()),
        ));
        samples.push(MetricSample::number(
            MetricKind::DiskFreeGB,
            self.disk.map(|d| d.free_gb()),
        ));
        samples.push(MetricSample::number(
            MetricKind::GpuPercent,
            self.gpu
                .and_then(|g| g.usage_percent)
                .map(f64::from),
        ));
        samples.push(MetricSample::number(
            MetricKind::GpuFrequencyMHz,
            self.gpu.and_then(|g| g.frequency_mhz),
        ));
        samples.push(MetricSample::number(
            MetricKind::BatteryPercent,
            self.battery.and_then(|b| b.percent),
        ));
        samples.push(MetricSample {
            kind: MetricKind::BatteryStatus,
            value: self
                .battery
                .and_then(|b| b.status)
                .map(MetricValue::Battery),
        });

        samples
    }
}

/// One formatted display line. Consumers render these in sequence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressLine {
    pub kind: MetricKind,
    pub text: String,
}

impl ProgressLine {
    pub fn new(kind: MetricKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for ProgressLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Fixed-shape output of the compact view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactSummary {
    pub avg_cpu_load: String,
    pub gpu_usage: String,
    pub mem_usage: String,
}

impl CompactSummary {
    pub fn lines(&self) -> [&str; 3] {
        [&self.avg_cpu_load, &self.gpu_usage, &self.mem_usage]
    }
}
