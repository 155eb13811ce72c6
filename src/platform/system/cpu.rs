use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use sysinfo::{CpuRefreshKind, RefreshKind, System};

use crate::core::system_monitor::CpuSensor;

/// CPU sensor backed by sysinfo
pub struct SysinfoCpuSensor {
    system: Mutex<System>,
}

impl SysinfoCpuSensor {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing().with_cpu(CpuRefreshKind::everything());
        Self {
            system: Mutex::new(System::new_with_specifics(refresh_kind)),
        }
    }
}

impl Default for SysinfoCpuSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuSensor for SysinfoCpuSensor {
    fn per_core_load(&self, interval: Duration) -> Vec<f32> {
        // First observation; the lock is released while we wait
        self.system.lock().refresh_cpu_usage();
        thread::sleep(interval);

        let mut system = self.system.lock();
        system.refresh_cpu_usage();
        system
            .cpus()
            .iter()
            .map(|cpu| cpu.cpu_usage().clamp(0.0, 100.0))
            .collect()
    }

    fn current_frequency(&self) -> Option<f64> {
        let mut system = self.system.lock();
        system.refresh_cpu_frequency();

        // Mean over the cores that report a clock; 0 means "not reported"
        let freqs: Vec<u64> = system
            .cpus()
            .iter()
            .map(|cpu| cpu.frequency())
            .filter(|f| *f > 0)
            .collect();

        if freqs.is_empty() {
            return None;
        }
        Some(freqs.iter().sum::<u64>() as f64 / freqs.len() as f64)
    }

    fn max_frequency(&self) -> Option<f64> {
        max_frequency_mhz()
    }
}

#[cfg(target_os = "linux")]
fn max_frequency_mhz() -> Option<f64> {
    let raw = std::fs::read_to_string("/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_max_freq").ok()?;
    parse_cpufreq_khz(&raw)
}

#[cfg(not(target_os = "linux"))]
fn max_frequency_mhz() -> Option<f64> {
    None
}

/// cpufreq files hold kHz
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_cpufreq_khz(raw: &str) -> Option<f64> {
    let khz: u64 = raw.trim().parse().ok()?;
    if khz == 0 {
        return None;
    }
    Some(khz as f64 / 1000.0)
}
