use std::io;
use thiserror::Error;

/// Custom error type for hostmon
#[derive(Error, Debug)]
pub enum HostmonError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("GPU driver error: {0}")]
    Driver(String),

    #[error("GPU not available: {0}")]
    GpuNotAvailable(String),

    #[error("Metric collection failed: {0}")]
    MetricCollection(String),

    #[error("Capture error: {0}")]
    Capture(String),
}

/// Result type alias for hostmon
pub type Result<T> = std::result::Result<T, HostmonError>;

impl HostmonError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        HostmonError::Config(msg.into())
    }

    /// Create a driver error
    pub fn driver<S: Into<String>>(msg: S) -> Self {
        HostmonError::Driver(msg.into())
    }

    pub fn gpu_not_available<S: Into<String>>(msg: S) -> Self {
        HostmonError::GpuNotAvailable(msg.into())
    }

    pub fn metric_collection<S: Into<String>>(msg: S) -> Self {
        HostmonError::MetricCollection(msg.into())
    }

    pub fn capture<S: Into<String>>(msg: S) -> Self {
        HostmonError::Capture(msg.into())
    }
}
