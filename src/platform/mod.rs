// Platform-specific code module

pub mod gpu;
pub mod system;
