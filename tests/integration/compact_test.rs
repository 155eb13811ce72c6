use std::sync::Arc;

use hostmon::core::config::PollConfig;
use hostmon::core::system_monitor::{
    render_full, summarize, CompactAggregator, MemoryUsage, MetricsAggregator, PollScope,
    GPU_NO_INFO,
};

use super::fakes::{FakeCpu, FakeGpu, Readings, GIB};

#[test]
fn test_average_of_three_cores() {
    let aggregator = CompactAggregator::new(Readings::default().into_sensors(), PollConfig::default());
    let summary = aggregator.collect_summary();

    assert_eq!(summary.avg_cpu_load, "AVG CPU: 20.0%");
    assert_eq!(summary.gpu_usage, GPU_NO_INFO);
    assert_eq!(summary.mem_usage, "RAM: 4.0 GB / 16.0 GB");
}

#[test]
fn test_gpu_usage_when_supported() {
    let aggregator = CompactAggregator::new(
        Readings {
            gpu_supported: true,
            gpu: FakeGpu {
                usage: Some(12),
                frequency: Some(1.8),
                ..Default::default()
            },
            ..Default::default()
        }
        .into_sensors(),
        PollConfig::default(),
    );

    assert_eq!(aggregator.collect_summary().gpu_usage, "GPU: 12%");
}

#[test]
fn test_compact_poll_skips_full_only_metrics() {
    let snapshot = CompactAggregator::new(Readings::default().into_sensors(), PollConfig::default())
        .sample();

    assert!(snapshot.disk.is_none());
    assert!(snapshot.cpu_frequency_mhz.is_none());
    assert!(snapshot.memory.is_some());
}

#[test]
fn test_no_cores_averages_to_zero() {
    let aggregator = CompactAggregator::new(
        Readings {
            cpu: FakeCpu::default(),
            ..Default::default()
        }
        .into_sensors(),
        PollConfig::default(),
    );
    assert_eq!(aggregator.collect_summary().avg_cpu_load, "AVG CPU: 0.0%");
}

#[test]
fn test_views_share_one_sensor_set() {
    let sensors = Readings {
        memory: Some(MemoryUsage {
            used_bytes: 3 * GIB / 2,
            total_bytes: 8 * GIB,
        }),
        ..Default::default()
    }
    .into_sensors();

    let full = MetricsAggregator::new(Arc::clone(&sensors), PollConfig::default());
    let compact = CompactAggregator::new(Arc::clone(&sensors), PollConfig::default());

    assert_eq!(Arc::strong_count(&sensors), 3);
    assert!(full
        .collect()
        .iter()
        .any(|l| l.text == "RAM: 18.8% (1.5 / 8.0 GB)"));
    assert_eq!(compact.collect_summary().mem_usage, "RAM: 1.5 GB / 8.0 GB");
}

#[test]
fn test_one_poll_renders_both_views() {
    let sensors = Readings::default().into_sensors();
    let snapshot = sensors.poll(&PollConfig::default(), PollScope::Full);

    let lines = render_full(&snapshot);
    let summary = summarize(&snapshot);

    assert_eq!(lines[0].text, "CPU1: 10.0%");
    assert_eq!(summary.lines(), ["AVG CPU: 20.0%", GPU_NO_INFO, "RAM: 4.0 GB / 16.0 GB"]);
}
