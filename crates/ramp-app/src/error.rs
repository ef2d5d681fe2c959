//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("API error: {0}")]
    Api(#[from] ramp_api::ApiError),

    #[error("Chain error: {0}")]
    Chain(#[from] ramp_chain::ChainError),

    #[error("{0}")]
    Monitor(#[from] ramp_monitor::MonitorError),

    #[error("Registry error: {0}")]
    Registry(#[from] ramp_registry::RegistryError),

    #[error("Core error: {0}")]
    Core(#[from] ramp_core::CoreError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] ramp_telemetry::TelemetryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
