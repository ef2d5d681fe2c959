//! Error types for ramp-monitor.

use thiserror::Error;

/// Monitor error types.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Order {0} is still active; wait for it to settle before submitting another")]
    OrderAlreadyActive(String),
}

/// Result type alias for monitor operations.
pub type MonitorResult<T> = std::result::Result<T, MonitorError>;
