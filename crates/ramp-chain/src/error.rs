//! Error types for ramp-chain.

use crate::signer::KeyError;
use ramp_core::Network;
use ramp_registry::RegistryError;
use thiserror::Error;

/// Chain-side error types.
///
/// The first three mirror the distinct fund-transfer failure modes: no
/// wallet, wrong network, token missing from the table.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("No wallet connected")]
    WalletNotConnected,

    #[error("Please switch to the {} network", .expected.display_name())]
    WrongNetwork {
        expected: Network,
        actual_chain_id: u64,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Invalid address {0:?}")]
    InvalidAddress(String),

    #[error("Key error: {0}")]
    Key(#[from] KeyError),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Invalid split recipients: {0}")]
    InvalidRecipients(String),

    #[error("Invalid split percentages: {0}")]
    InvalidPercentages(String),

    #[error(
        "Decimals mismatch for {token} on {network}: table says {table}, contract says {onchain}"
    )]
    DecimalsMismatch {
        token: String,
        network: Network,
        table: u8,
        onchain: u8,
    },

    #[error("Core error: {0}")]
    Core(#[from] ramp_core::CoreError),
}

/// Result type alias for chain operations.
pub type ChainResult<T> = std::result::Result<T, ChainError>;
