// Sensors against the real host. Readings vary, so only invariants are checked.

use std::time::Duration;

use hostmon::core::system_monitor::{
    BatterySensor, CpuSensor, DiskSensor, MemorySensor,
};
use hostmon::platform::system::{
    SysinfoCpuSensor, SystemDiskSensor, SysinfoMemorySensor, SystemBatterySensor,
};
use sysinfo::System;

#[test]
fn test_one_load_per_logical_core() {
    let sensor = SysinfoCpuSensor::new();
    let loads = sensor.per_core_load(Duration::from_millis(100));

    let mut system = System::new();
    system.refresh_cpu_all();
    assert_eq!(loads.len(), system.cpus().len());
    assert!(loads.iter().all(|l| (0.0..=100.0).contains(l)));
}

#[test]
fn test_memory_used_never_exceeds_total() {
    if let Some(memory) = SysinfoMemorySensor::new().usage() {
        assert!(memory.used_bytes <= memory.total_bytes);
        assert!((0.0..=100.0).contains(&memory.usage_percent()));
        assert!(memory.used_gb() <= memory.total_gb());
    }
}

#[test]
fn test_disk_free_fits_in_total() {
    if let Some(disk) = SystemDiskSensor::root().usage() {
        assert!(disk.free_bytes <= disk.total_bytes);
        assert!(disk.used_bytes + disk.free_bytes <= disk.total_bytes);
        assert!((0.0..=100.0).contains(&disk.usage_percent()));
    }
}

#[test]
fn test_battery_percent_in_range() {
    // Machines without a battery report None
    if let Some(percent) = SystemBatterySensor.percent() {
        assert!((0.0..=100.0).contains(&percent));
    }
}

#[test]
fn test_frequency_is_positive_when_reported() {
    let sensor = SysinfoCpuSensor::new();
    if let Some(freq) = sensor.current_frequency() {
        assert!(freq > 0.0);
    }
}
