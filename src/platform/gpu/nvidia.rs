#[cfg(feature = "nvml")]
use nvml_wrapper::{enum_wrappers::device::Clock, Device, Nvml};

use super::driver::GpuDriver;
use crate::error::{HostmonError, Result};

/// Substring identifying NVIDIA devices by name
pub const NVIDIA_VENDOR: &str = "NVIDIA";

/// NVIDIA Management Library, the library behind nvidia-smi.
///
/// `Nvml::init` loads the shared library at runtime, so a machine without the
/// NVIDIA driver surfaces as an init error rather than a link failure.
pub struct NvmlDriver {
    #[cfg(feature = "nvml")]
    nvml: Option<Nvml>,
}

impl NvmlDriver {
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "nvml")]
            nvml: None,
        }
    }

    #[cfg(feature = "nvml")]
    fn nvml(&self) -> Result<&Nvml> {
        self.nvml
            .as_ref()
            .ok_or_else(|| HostmonError::driver("NVML not initialized"))
    }

    #[cfg(feature = "nvml")]
    fn device(&self, index: u32) -> Result<Device<'_>> {
        self.nvml()?.device_by_index(index).map_err(|e| {
            HostmonError::metric_collection(format!("Failed to get NVIDIA device {}: {}", index, e))
        })
    }
}

impl Default for NvmlDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "nvml")]
impl GpuDriver for NvmlDriver {
    fn name(&self) -> &'static str {
        "NVML"
    }

    fn init(&mut self) -> Result<()> {
        let nvml = Nvml::init()
            .map_err(|e| HostmonError::gpu_not_available(format!("Failed to init NVML: {}", e)))?;
        self.nvml = Some(nvml);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        match self.nvml.take() {
            Some(nvml) => nvml
                .shutdown()
                .map_err(|e| HostmonError::driver(format!("NVML shutdown failed: {}", e))),
            None => Ok(()),
        }
    }

    fn device_count(&self) -> Result<u32> {
        self.nvml()?
            .device_count()
            .map_err(|e| HostmonError::driver(format!("Failed to count NVIDIA devices: {}", e)))
    }

    fn device_name(&self, index: u32) -> Result<String> {
        self.device(index)?.name().map_err(|e| {
            HostmonError::metric_collection(format!("Failed to read GPU {} name: {}", index, e))
        })
    }

    fn utilization_percent(&self, index: u32) -> Result<u32> {
        self.device(index)?
            .utilization_rates()
            .map(|u| u.gpu)
            .map_err(|e| {
                HostmonError::metric_collection(format!("Failed to get GPU utilization: {}", e))
            })
    }

    fn graphics_clock(&self, index: u32) -> Result<u32> {
        self.device(index)?
            .clock_info(Clock::Graphics)
            .map_err(|e| HostmonError::metric_collection(format!("Failed to get GPU clock: {}", e)))
    }
}

/// Fallback when the NVML feature is not enabled: init always fails, so the
/// GPU is reported as unsupported.
#[cfg(not(feature = "nvml"))]
impl GpuDriver for NvmlDriver {
    fn name(&self) -> &'static str {
        "NVML"
    }

    fn init(&mut self) -> Result<()> {
        Err(HostmonError::gpu_not_available(
            "NVML feature not enabled. Recompile with --features nvml",
        ))
    }

    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }

    fn device_count(&self) -> Result<u32> {
        Ok(0)
    }

    fn device_name(&self, index: u32) -> Result<String> {
        Err(HostmonError::gpu_not_available(format!("No GPU {}", index)))
    }

    fn utilization_percent(&self, index: u32) -> Result<u32> {
        Err(HostmonError::gpu_not_available(format!("No GPU {}", index)))
    }

    fn graphics_clock(&self, index: u32) -> Result<u32> {
        Err(HostmonError::gpu_not_available(format!("No GPU {}", index)))
    }
}
