//! OS-backed sensors for CPU, memory, disk and battery.

mod cpu;
mod disk;
mod memory;
mod power;

pub use cpu::SysinfoCpuSensor;
pub use disk::{usage_from_block_counts, SystemDiskSensor};
pub use memory::SysinfoMemorySensor;
pub use power::SystemBatterySensor;
