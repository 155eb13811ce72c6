use std::path::PathBuf;

use crate::core::system_monitor::{DiskSensor, DiskUsage};

/// Usage of one fixed mount point
pub struct SystemDiskSensor {
    mount_point: PathBuf,
    #[cfg(not(unix))]
    disks: parking_lot::Mutex<sysinfo::Disks>,
}

impl SystemDiskSensor {
    /// Sensor for the root filesystem
    pub fn root() -> Self {
        Self::for_mount_point(root_mount_point())
    }

    pub fn for_mount_point(mount_point: impl Into<PathBuf>) -> Self {
        Self {
            mount_point: mount_point.into(),
            #[cfg(not(unix))]
            disks: parking_lot::Mutex::new(sysinfo::Disks::new_with_refreshed_list()),
        }
    }
}

fn root_mount_point() -> PathBuf {
    #[cfg(windows)]
    {
        PathBuf::from(std::env::var("SystemDrive").unwrap_or_else(|_| "C:".to_string()) + "\\")
    }
    #[cfg(not(windows))]
    {
        PathBuf::from("/")
    }
}

/// Usage from raw statvfs counters, `df` style: root-reserved blocks
/// (`bfree - bavail`) are neither used nor free.
pub fn usage_from_block_counts(blocks: u64, bfree: u64, bavail: u64, frsize: u64) -> DiskUsage {
    DiskUsage {
        total_bytes: blocks.saturating_mul(frsize),
        used_bytes: blocks.saturating_sub(bfree).saturating_mul(frsize),
        free_bytes: bavail.saturating_mul(frsize),
    }
}

#[cfg(unix)]
impl DiskSensor for SystemDiskSensor {
    #[allow(clippy::unnecessary_cast)]
    fn usage(&self) -> Option<DiskUsage> {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;

        let path = CString::new(self.mount_point.as_os_str().as_bytes()).ok()?;
        let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
        // SAFETY: `path` is NUL-terminated and `stat` is a valid out-pointer
        if unsafe { libc::statvfs(path.as_ptr(), &mut stat) } != 0 {
            log::debug!(
                "statvfs({}) failed: {}",
                self.mount_point.display(),
                std::io::Error::last_os_error()
            );
            return None;
        }

        Some(usage_from_block_counts(
            stat.f_blocks as u64,
            stat.f_bfree as u64,
            stat.f_bavail as u64,
            stat.f_frsize as u64,
        ))
    }
}

#[cfg(not(unix))]
impl DiskSensor for SystemDiskSensor {
    fn usage(&self) -> Option<DiskUsage> {
        let mut disks = self.disks.lock();
        disks.refresh(true);

        let disk = disks
            .list()
            .iter()
            .find(|disk| disk.mount_point() == self.mount_point.as_path())?;

        // No reserved blocks here; everything not available is used
        let total = disk.total_space();
        let free = disk.available_space().min(total);
        Some(DiskUsage {
            total_bytes: total,
            used_bytes: total - free,
            free_bytes: free,
        })
    }
}
