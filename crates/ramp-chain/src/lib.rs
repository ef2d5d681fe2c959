//! On-chain side of the off-ramp: key management, ERC-20 transfer
//! submission, and the split-factory client.
//!
//! Transfers go through the [`Wallet`] trait so the orchestration layer and
//! tests never touch a live provider. The real implementation signs locally
//! and submits over JSON-RPC; submission is fire-and-forget, returning the
//! hash without waiting for a receipt.

pub mod error;
pub mod factory;
pub mod rpc;
pub mod signer;
pub mod transfer;
pub mod wallet;

pub use error::{ChainError, ChainResult};
pub use factory::{SplitFactoryClient, SplitSpec};
pub use rpc::RpcWallet;
pub use signer::{KeyError, KeyManager, KeySource};
pub use transfer::{FundTransfer, TransferOutcome};
pub use wallet::{MockWallet, Wallet};

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = std::pin::Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;
