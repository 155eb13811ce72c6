// Scripted sensors and a call-counting GPU driver shared by the tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hostmon::core::system_monitor::{
    BatteryReading, BatterySensor, CpuSensor, DiskSensor, DiskUsage, GpuAvailability, GpuSensor,
    MemorySensor, MemoryUsage, SensorSet,
};
use hostmon::error::{HostmonError, Result};
use hostmon::platform::gpu::GpuDriver;

pub const GIB: u64 = 1024 * 1024 * 1024;

#[derive(Clone, Default)]
pub struct FakeCpu {
    pub loads: Vec<f32>,
    pub current: Option<f64>,
    pub max: Option<f64>,
}

impl CpuSensor for FakeCpu {
    fn per_core_load(&self, _interval: Duration) -> Vec<f32> {
        self.loads.clone()
    }

    fn current_frequency(&self) -> Option<f64> {
        self.current
    }

    fn max_frequency(&self) -> Option<f64> {
        self.max
    }
}

pub struct FakeMemory(pub Option<MemoryUsage>);

impl MemorySensor for FakeMemory {
    fn usage(&self) -> Option<MemoryUsage> {
        self.0
    }
}

pub struct FakeDisk(pub Option<DiskUsage>);

impl DiskSensor for FakeDisk {
    fn usage(&self) -> Option<DiskUsage> {
        self.0
    }
}

pub struct FakeBattery(pub Option<BatteryReading>);

impl BatterySensor for FakeBattery {
    fn read(&self) -> Option<BatteryReading> {
        self.0
    }
}

pub struct FakeChecker(pub bool);

impl GpuAvailability for FakeChecker {
    fn is_supported(&self) -> bool {
        self.0
    }
}

/// GPU sensor that records whether it was queried
#[derive(Default)]
pub struct FakeGpu {
    pub usage: Option<u32>,
    pub frequency: Option<f64>,
    pub queries: Arc<AtomicUsize>,
}

impl GpuSensor for FakeGpu {
    fn usage_percent(&self) -> Option<u32> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.usage
    }

    fn frequency_mhz(&self) -> Option<f64> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.frequency
    }
}

/// Scripted readings for one `SensorSet`
pub struct Readings {
    pub cpu: FakeCpu,
    pub memory: Option<MemoryUsage>,
    pub disk: Option<DiskUsage>,
    pub battery: Option<BatteryReading>,
    pub gpu_supported: bool,
    pub gpu: FakeGpu,
}

impl Default for Readings {
    fn default() -> Self {
        Self {
            cpu: FakeCpu {
                loads: vec![10.0, 20.0, 30.0],
                current: Some(2400.0),
                max: Some(3600.0),
            },
            memory: Some(MemoryUsage {
                used_bytes: 4 * GIB,
                total_bytes: 16 * GIB,
            }),
            disk: Some(DiskUsage {
                total_bytes: 200 * GIB,
                used_bytes: 150 * GIB,
                free_bytes: 50 * GIB,
            }),
            battery: None,
            gpu_supported: false,
            gpu: FakeGpu::default(),
        }
    }
}

impl Readings {
    pub fn into_sensors(self) -> Arc<SensorSet> {
        Arc::new(SensorSet::new(
            Box::new(self.cpu),
            Box::new(FakeMemory(self.memory)),
            Box::new(FakeDisk(self.disk)),
            Box::new(FakeBattery(self.battery)),
            Box::new(FakeChecker(self.gpu_supported)),
            Box::new(self.gpu),
        ))
    }
}

#[derive(Default)]
pub struct DriverCalls {
    pub init: AtomicUsize,
    pub shutdown: AtomicUsize,
}

impl DriverCalls {
    pub fn inits(&self) -> usize {
        self.init.load(Ordering::SeqCst)
    }

    pub fn shutdowns(&self) -> usize {
        self.shutdown.load(Ordering::SeqCst)
    }
}

/// In-memory driver that counts lifecycle calls
pub struct CountingDriver {
    pub calls: Arc<DriverCalls>,
    pub fail_init: bool,
    pub devices: Vec<(&'static str, u32, u32)>,
}

impl CountingDriver {
    pub fn new(devices: Vec<(&'static str, u32, u32)>) -> (Self, Arc<DriverCalls>) {
        let calls = Arc::new(DriverCalls::default());
        (
            Self {
                calls: Arc::clone(&calls),
                fail_init: false,
                devices,
            },
            calls,
        )
    }

    fn device(&self, index: u32) -> Result<&(&'static str, u32, u32)> {
        self.devices
            .get(index as usize)
            .ok_or_else(|| HostmonError::driver(format!("no device {}", index)))
    }
}

impl GpuDriver for CountingDriver {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn init(&mut self) -> Result<()> {
        self.calls.init.fetch_add(1, Ordering::SeqCst);
        if self.fail_init {
            return Err(HostmonError::driver("library not found"));
        }
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.calls.shutdown.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn device_count(&self) -> Result<u32> {
        Ok(self.devices.len() as u32)
    }

    fn device_name(&self, index: u32) -> Result<String> {
        Ok(self.device(index)?.0.to_string())
    }

    fn utilization_percent(&self, index: u32) -> Result<u32> {
        Ok(self.device(index)?.1)
    }

    fn graphics_clock(&self, index: u32) -> Result<u32> {
        Ok(self.device(index)?.2)
    }
}
