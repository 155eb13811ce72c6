use crate::error::Result;

/// Raw access to a GPU vendor query library.
///
/// Implementations are driven exclusively through
/// [`DriverHandle`](super::DriverHandle), which guarantees `init` runs at most
/// once and `shutdown` only after a successful `init`.
pub trait GpuDriver: Send {
    /// Library name used in log messages
    fn name(&self) -> &'static str;

    fn init(&mut self) -> Result<()>;

    fn shutdown(&mut self) -> Result<()>;

    fn device_count(&self) -> Result<u32>;

    fn device_name(&self, index: u32) -> Result<String>;

    /// Utilization of the device in percent
    fn utilization_percent(&self, index: u32) -> Result<u32>;

    /// Graphics clock in the driver's native clock unit
    fn graphics_clock(&self, index: u32) -> Result<u32>;
}
