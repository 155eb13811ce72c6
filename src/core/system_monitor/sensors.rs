use std::sync::Arc;
use std::time::Duration;

use crate::core::config::PollConfig;
use crate::platform::gpu::{self, DriverHandle};
use crate::platform::system::{
    SysinfoCpuSensor, SystemDiskSensor, SysinfoMemorySensor, SystemBatterySensor,
};

use super::metrics::{
    BatteryReading, BatteryStatus, DiskUsage, GpuReading, MemoryUsage, PollSnapshot,
};

/// Per-core load and clock speed of the host CPU
pub trait CpuSensor: Send + Sync {
    /// Sample utilization of every logical core.
    ///
    /// Blocks the calling thread for `interval`: the load is the difference
    /// between two observations taken that far apart. Every value is in
    /// `0.0..=100.0`.
    fn per_core_load(&self, interval: Duration) -> Vec<f32>;

    /// Current clock in MHz, `None` where the platform does not report it
    fn current_frequency(&self) -> Option<f64>;

    /// Maximum clock in MHz, `None` where the platform does not report it
    fn max_frequency(&self) -> Option<f64>;
}

pub trait MemorySensor: Send + Sync {
    fn usage(&self) -> Option<MemoryUsage>;

    fn usage_percent(&self) -> Option<f64> {
        self.usage().map(|m| m.usage_percent())
    }

    fn used_gb(&self) -> Option<f64> {
        self.usage().map(|m| m.used_gb())
    }

    fn total_gb(&self) -> Option<f64> {
        self.usage().map(|m| m.total_gb())
    }
}

/// Usage of the root filesystem
pub trait DiskSensor: Send + Sync {
    fn usage(&self) -> Option<DiskUsage>;

    fn usage_percent(&self) -> Option<f64> {
        self.usage().map(|d| d.usage_percent())
    }

    fn free_gb(&self) -> Option<f64> {
        self.usage().map(|d| d.free_gb())
    }
}

/// Battery state. `None` means there is no battery, which is a normal outcome.
pub trait BatterySensor: Send + Sync {
    fn read(&self) -> Option<BatteryReading>;

    fn status(&self) -> Option<BatteryStatus> {
        self.read().and_then(|b| b.status)
    }

    fn percent(&self) -> Option<f64> {
        self.read().and_then(|b| b.percent)
    }
}

/// Decides whether GPU queries can be made on this host at all
pub trait GpuAvailability: Send + Sync {
    /// Never fails: any driver problem is reported as `false`.
    fn is_supported(&self) -> bool;
}

/// GPU utilization and clock.
///
/// Only meaningful once [`GpuAvailability::is_supported`] returned `true`.
/// When the driver works but no device matches the target vendor both
/// readings are zero, not `None`.
pub trait GpuSensor: Send + Sync {
    fn usage_percent(&self) -> Option<u32>;

    fn frequency_mhz(&self) -> Option<f64>;
}

/// Which readings a poll needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollScope {
    /// Everything the full view shows
    Full,
    /// CPU load, GPU usage and memory only
    Compact,
}

/// One instance of every sensor, shared by both views.
pub struct SensorSet {
    cpu: Box<dyn CpuSensor>,
    memory: Box<dyn MemorySensor>,
    disk: Box<dyn DiskSensor>,
    battery: Box<dyn BatterySensor>,
    gpu_checker: Box<dyn GpuAvailability>,
    gpu: Box<dyn GpuSensor>,
    driver: Option<Arc<DriverHandle>>,
}

impl SensorSet {
    pub fn new(
        cpu: Box<dyn CpuSensor>,
        memory: Box<dyn MemorySensor>,
        disk: Box<dyn DiskSensor>,
        battery: Box<dyn BatterySensor>,
        gpu_checker: Box<dyn GpuAvailability>,
        gpu: Box<dyn GpuSensor>,
    ) -> Self {
        Self {
            cpu,
            memory,
            disk,
            battery,
            gpu_checker,
            gpu,
            driver: None,
        }
    }

    /// Sensors backed by the operating system and the NVIDIA driver.
    ///
    /// The driver is not touched here; it is loaded on the first GPU query.
    pub fn system() -> Self {
        let handle = Arc::new(DriverHandle::nvidia());
        let (checker, sensor) = gpu::nvidia_sensors(&handle);

        let mut set = Self::new(
            Box::new(SysinfoCpuSensor::new()),
            Box::new(SysinfoMemorySensor::new()),
            Box::new(SystemDiskSensor::root()),
            Box::new(SystemBatterySensor),
            Box::new(checker),
            Box::new(sensor),
        );
        set.driver = Some(handle);
        set
    }

    /// Attach the driver handle the GPU sensors use so it can be released
    /// through [`SensorSet::release_driver`].
    pub fn with_driver(mut self, handle: Arc<DriverHandle>) -> Self {
        self.driver = Some(handle);
        self
    }

    /// Take one reading of every sensor the scope needs.
    ///
    /// CPU load is sampled first and blocks for the configured interval.
    /// GPU sensors are only queried when the availability checker agrees.
    pub fn poll(&self, config: &PollConfig, scope: PollScope) -> PollSnapshot {
        let cpu_loads = self.cpu.per_core_load(config.cpu_interval());

        let mut snapshot = PollSnapshot {
            timestamp: chrono::Utc::now().timestamp(),
            cpu_loads,
            memory: self.memory.usage(),
            ..Default::default()
        };

        if scope == PollScope::Full {
            snapshot.cpu_frequency_mhz = self.cpu.current_frequency();
            snapshot.cpu_max_frequency_mhz = self.cpu.max_frequency();
            snapshot.disk = self.disk.usage();
            snapshot.battery = self.battery.read();
        }

        if self.gpu_checker.is_supported() {
            snapshot.gpu = Some(GpuReading {
                usage_percent: self.gpu.usage_percent(),
                frequency_mhz: match scope {
                    PollScope::Full => self.gpu.frequency_mhz(),
                    PollScope::Compact => None,
                },
            });
        }

        snapshot
    }

    /// Release the GPU driver. Safe to call more than once.
    pub fn release_driver(&self) {
        if let Some(handle) = &self.driver {
            if let Err(e) = handle.shutdown() {
                log::warn!("Failed to release GPU driver: {}", e);
            }
        }
    }
}
