use std::sync::Arc;

use super::driver::GpuDriver;
use super::handle::DriverHandle;
use crate::core::system_monitor::GpuSensor;
use crate::error::Result;

/// Driver clock units per MHz
const CLOCK_UNITS_PER_MHZ: f64 = 1000.0;

/// Reads the first device whose name contains the vendor string.
///
/// With no matching device the readings are zero rather than absent; a driver
/// error yields `None`.
pub struct VendorGpuSensor {
    handle: Arc<DriverHandle>,
    vendor: String,
}

impl VendorGpuSensor {
    pub fn new(handle: Arc<DriverHandle>, vendor: impl Into<String>) -> Self {
        Self {
            handle,
            vendor: vendor.into(),
        }
    }

    fn query<T>(
        &self,
        fallback: T,
        read: impl FnOnce(&dyn GpuDriver, u32) -> Result<T>,
    ) -> Option<T> {
        let result = self.handle.with_driver(|driver| {
            match find_vendor_device(driver, &self.vendor)? {
                Some(index) => read(driver, index),
                None => Ok(fallback),
            }
        });

        match result {
            Ok(value) => Some(value),
            Err(e) => {
                log::debug!("GPU query failed: {}", e);
                None
            }
        }
    }
}

/// Index of the first device whose name contains `vendor`
pub fn find_vendor_device(driver: &dyn GpuDriver, vendor: &str) -> Result<Option<u32>> {
    for index in 0..driver.device_count()? {
        if driver.device_name(index)?.contains(vendor) {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

impl GpuSensor for VendorGpuSensor {
    fn usage_percent(&self) -> Option<u32> {
        self.query(0, |driver, index| driver.utilization_percent(index))
    }

    fn frequency_mhz(&self) -> Option<f64> {
        self.query(0.0, |driver, index| {
            driver
                .graphics_clock(index)
                .map(|clock| f64::from(clock) / CLOCK_UNITS_PER_MHZ)
        })
    }
}
