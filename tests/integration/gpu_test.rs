use std::sync::Arc;

use hostmon::core::config::PollConfig;
use hostmon::core::system_monitor::{
    CompactAggregator, GpuAvailability, GpuSensor, MetricsAggregator, SensorSet,
};
use hostmon::platform::gpu::{
    find_vendor_device, nvidia_sensors, DriverHandle, GpuChecker, VendorGpuSensor, NVIDIA_VENDOR,
};

use super::fakes::{CountingDriver, DriverCalls, FakeBattery, FakeCpu, FakeDisk, FakeMemory};

fn shared_handle(devices: Vec<(&'static str, u32, u32)>) -> (Arc<DriverHandle>, Arc<DriverCalls>) {
    let (driver, calls) = CountingDriver::new(devices);
    (Arc::new(DriverHandle::new(Box::new(driver))), calls)
}

#[test]
fn test_checker_initializes_driver_once() {
    let (handle, calls) = shared_handle(vec![("NVIDIA GeForce RTX 3070", 40, 1500)]);
    let checker = GpuChecker::new(Arc::clone(&handle));

    assert!(checker.is_supported());
    assert!(checker.is_supported());
    assert_eq!(calls.inits(), 1);
}

#[test]
fn test_checker_and_sensor_share_one_init() {
    let (handle, calls) = shared_handle(vec![("NVIDIA GeForce RTX 3070", 40, 1500)]);
    let (checker, sensor) = nvidia_sensors(&handle);

    assert!(checker.is_supported());
    assert_eq!(sensor.usage_percent(), Some(40));
    assert_eq!(sensor.frequency_mhz(), Some(1.5));
    assert_eq!(calls.inits(), 1);
}

#[test]
fn test_no_devices_is_unsupported() {
    let (handle, _calls) = shared_handle(Vec::new());
    assert!(!GpuChecker::new(handle).is_supported());
}

#[test]
fn test_failed_init_is_cached() {
    let (mut driver, calls) = CountingDriver::new(vec![("NVIDIA Tesla T4", 1, 1)]);
    driver.fail_init = true;
    let handle = Arc::new(DriverHandle::new(Box::new(driver)));
    let (checker, sensor) = nvidia_sensors(&handle);

    assert!(!checker.is_supported());
    assert!(!checker.is_supported());
    assert_eq!(sensor.usage_percent(), None);
    assert_eq!(calls.inits(), 1);

    drop(checker);
    drop(sensor);
    drop(handle);
    assert_eq!(calls.shutdowns(), 0);
}

#[test]
fn test_other_vendor_reads_zero() {
    let (handle, _calls) = shared_handle(vec![("AMD Radeon RX 6800", 70, 2000)]);
    let sensor = VendorGpuSensor::new(Arc::clone(&handle), NVIDIA_VENDOR);

    assert!(GpuChecker::new(handle).is_supported());
    assert_eq!(sensor.usage_percent(), Some(0));
    assert_eq!(sensor.frequency_mhz(), Some(0.0));
}

#[test]
fn test_first_matching_device_wins() {
    let (handle, _calls) = shared_handle(vec![
        ("Intel UHD 630", 5, 300),
        ("NVIDIA RTX A2000", 33, 1200),
        ("NVIDIA RTX A4000", 90, 1800),
    ]);

    let index = handle
        .with_driver(|driver| find_vendor_device(driver, NVIDIA_VENDOR))
        .unwrap();
    assert_eq!(index, Some(1));
}

#[test]
fn test_release_shuts_down_once() {
    let (handle, calls) = shared_handle(vec![("NVIDIA GeForce GTX 1660", 20, 1400)]);
    let (checker, sensor) = nvidia_sensors(&handle);

    let sensors = Arc::new(
        SensorSet::new(
            Box::new(FakeCpu {
                loads: vec![5.0],
                ..Default::default()
            }),
            Box::new(FakeMemory(None)),
            Box::new(FakeDisk(None)),
            Box::new(FakeBattery(None)),
            Box::new(checker),
            Box::new(sensor),
        )
        .with_driver(Arc::clone(&handle)),
    );

    let full = MetricsAggregator::new(Arc::clone(&sensors), PollConfig::default());
    let compact = CompactAggregator::new(Arc::clone(&sensors), PollConfig::default());

    let lines: Vec<String> = full.collect().into_iter().map(|l| l.text).collect();
    assert!(lines.contains(&"GPU: 20%".to_string()));
    assert!(lines.contains(&"GPU Frequency: 1.4 MHz".to_string()));
    assert_eq!(compact.collect_summary().gpu_usage, "GPU: 20%");
    assert_eq!(calls.inits(), 1);

    sensors.release_driver();
    sensors.release_driver();
    drop(full);
    drop(compact);
    drop(sensors);
    drop(handle);
    assert_eq!(calls.shutdowns(), 1);
}

#[test]
fn test_uninitialized_driver_is_never_shut_down() {
    let (handle, calls) = shared_handle(vec![("NVIDIA GeForce RTX 4090", 1, 1)]);
    assert!(!handle.is_initialized());
    handle.shutdown().unwrap();
    assert_eq!(calls.inits(), 0);
    assert_eq!(calls.shutdowns(), 0);
}
