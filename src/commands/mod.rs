// Command handlers module
pub mod monitor;
pub mod settings;
pub mod snapshot;
pub mod version;

// Re-exports for cleaner imports
pub use monitor::execute as monitor;
pub use settings::execute as settings;
pub use snapshot::execute as snapshot;
pub use version::execute as version;
