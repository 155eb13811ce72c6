use parking_lot::Mutex;

use super::driver::GpuDriver;
use crate::error::{HostmonError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum DriverState {
    Uninitialized,
    Ready,
    /// Init failed; the reason is replayed instead of retrying
    Failed(String),
    Released,
}

struct Inner {
    driver: Box<dyn GpuDriver>,
    state: DriverState,
}

/// Process-wide owner of a GPU driver.
///
/// The driver is initialized lazily on first use and at most once, no matter
/// how many sensors share the handle. A failed init is remembered, so later
/// calls fail fast without touching the library again. `shutdown` releases the
/// driver exactly once; dropping the handle does it too.
pub struct DriverHandle {
    inner: Mutex<Inner>,
}

impl DriverHandle {
    pub fn new(driver: Box<dyn GpuDriver>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                driver,
                state: DriverState::Uninitialized,
            }),
        }
    }

    /// Handle for the NVIDIA management library
    pub fn nvidia() -> Self {
        Self::new(Box::new(super::nvidia::NvmlDriver::new()))
    }

    /// Initialize the driver unless that already happened
    pub fn ensure_initialized(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        Self::init_locked(&mut inner)
    }

    fn init_locked(inner: &mut Inner) -> Result<()> {
        match inner.state.clone() {
            DriverState::Ready => Ok(()),
            DriverState::Failed(reason) => Err(HostmonError::driver(reason)),
            DriverState::Released => Err(HostmonError::driver(format!(
                "{} has already been shut down",
                inner.driver.name()
            ))),
            DriverState::Uninitialized => match inner.driver.init() {
                Ok(()) => {
                    log::debug!("{} initialized", inner.driver.name());
                    inner.state = DriverState::Ready;
                    Ok(())
                }
                Err(e) => {
                    log::warn!("{} unavailable: {}", inner.driver.name(), e);
                    inner.state = DriverState::Failed(e.to_string());
                    Err(e)
                }
            },
        }
    }

    /// Run a query against the initialized driver.
    ///
    /// Init and query happen under the same lock, so concurrent callers never
    /// observe a half-initialized driver.
    pub fn with_driver<T>(&self, query: impl FnOnce(&dyn GpuDriver) -> Result<T>) -> Result<T> {
        let mut inner = self.inner.lock();
        Self::init_locked(&mut inner)?;
        query(inner.driver.as_ref())
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.lock().state == DriverState::Ready
    }

    /// Release the driver. Later calls are no-ops.
    pub fn shutdown(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        let previous = std::mem::replace(&mut inner.state, DriverState::Released);
        match previous {
            DriverState::Ready => {
                log::debug!("Shutting down {}", inner.driver.name());
                inner.driver.shutdown()
            }
            _ => Ok(()),
        }
    }
}

impl Drop for DriverHandle {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::warn!("GPU driver shutdown failed: {}", e);
        }
    }
}
