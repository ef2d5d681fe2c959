//! Error types for ramp-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Invalid token symbol: {0}")]
    InvalidToken(String),

    #[error("Decimal parse error: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Amount {amount} overflows {decimals}-decimal raw units")]
    AmountOverflow { amount: String, decimals: u8 },
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
