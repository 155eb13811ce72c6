use parking_lot::Mutex;
use sysinfo::{MemoryRefreshKind, RefreshKind, System};

use crate::core::system_monitor::{MemoryUsage, MemorySensor};

pub struct SysinfoMemorySensor {
    system: Mutex<System>,
}

impl SysinfoMemorySensor {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing().with_memory(MemoryRefreshKind::everything());
        Self {
            system: Mutex::new(System::new_with_specifics(refresh_kind)),
        }
    }
}

impl Default for SysinfoMemorySensor {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySensor for SysinfoMemorySensor {
    fn usage(&self) -> Option<MemoryUsage> {
        let mut system = self.system.lock();
        system.refresh_memory();

        let total = system.total_memory();
        if total == 0 {
            return None;
        }
        Some(MemoryUsage {
            used_bytes: system.used_memory().min(total),
            total_bytes: total,
        })
    }
}
