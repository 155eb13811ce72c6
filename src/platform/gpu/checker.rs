use std::sync::Arc;

use super::handle::DriverHandle;
use crate::core::system_monitor::GpuAvailability;

/// Reports whether the shared driver initializes and sees at least one device
pub struct GpuChecker {
    handle: Arc<DriverHandle>,
}

impl GpuChecker {
    pub fn new(handle: Arc<DriverHandle>) -> Self {
        Self { handle }
    }
}

impl GpuAvailability for GpuChecker {
    fn is_supported(&self) -> bool {
        match self.handle.with_driver(|driver| driver.device_count()) {
            Ok(count) => count > 0,
            Err(e) => {
                log::debug!("GPU not supported: {}", e);
                false
            }
        }
    }
}
