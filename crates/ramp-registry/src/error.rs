//! Error types for ramp-registry.

use ramp_core::{Network, TokenSymbol};
use thiserror::Error;

/// Registry error types.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Token {token} not supported on {network}")]
    UnsupportedToken {
        token: TokenSymbol,
        network: Network,
    },

    #[error("No split factory deployed on {0}")]
    NoFactory(Network),

    #[error("Core error: {0}")]
    Core(#[from] ramp_core::CoreError),
}

/// Result type alias for registry operations.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;
