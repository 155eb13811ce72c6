//! GPU-specific platform code.
//!
//! A [`GpuDriver`] wraps a vendor query library, a [`DriverHandle`] owns its
//! init/shutdown lifecycle, and the checker and sensor share that handle.

mod checker;
mod driver;
mod handle;
mod nvidia;
mod sensor;

pub use checker::GpuChecker;
pub use driver::GpuDriver;
pub use handle::DriverHandle;
pub use nvidia::{NvmlDriver, NVIDIA_VENDOR};
pub use sensor::{find_vendor_device, VendorGpuSensor};

use std::sync::Arc;

/// Availability checker and NVIDIA sensor sharing one driver handle
pub fn nvidia_sensors(handle: &Arc<DriverHandle>) -> (GpuChecker, VendorGpuSensor) {
    (
        GpuChecker::new(Arc::clone(handle)),
        VendorGpuSensor::new(Arc::clone(handle), NVIDIA_VENDOR),
    )
}
