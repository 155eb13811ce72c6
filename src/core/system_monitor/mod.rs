//! Metrics collection and presentation pipeline.
//!
//! Sensors read the host, a [`SensorSet`] polls them once per tick, and the
//! two views turn a [`PollSnapshot`] into display lines: the full
//! [`MetricsAggregator`] and the reduced [`CompactAggregator`].

mod aggregator;
mod compact;
pub mod format;
mod metrics;
mod sensors;

pub use aggregator::{render_full, MetricsAggregator};
pub use compact::{average_load, summarize, CompactAggregator, GPU_NO_INFO};
pub use metrics::{
    BatteryReading, BatteryStatus, CompactSummary, DiskUsage, GpuReading, MemoryUsage,
    MetricKind, MetricSample, MetricValue, PollSnapshot, ProgressLine,
};
pub use sensors::{
    BatterySensor, CpuSensor, DiskSensor, GpuAvailability, GpuSensor, MemorySensor, PollScope,
    SensorSet,
};
