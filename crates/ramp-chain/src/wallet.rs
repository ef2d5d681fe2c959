//! Wallet trait for submitting token transfers.
//!
//! Abstracts the signing/submission backend so the transfer path can be
//! unit-tested without a live provider, and so alternative backends (e.g. a
//! remote signer) can slot in later.

use crate::error::{ChainError, ChainResult};
use crate::BoxFuture;
use alloy::primitives::{Address, TxHash, U256};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A connected wallet capable of ERC-20 operations.
pub trait Wallet: Send + Sync {
    /// The wallet's own address.
    fn address(&self) -> Address;

    /// Chain id the wallet is currently connected to.
    fn chain_id(&self) -> BoxFuture<'_, ChainResult<u64>>;

    /// Submit `transfer(to, amount_raw)` on the given token contract.
    ///
    /// Resolves as soon as the transaction is accepted by the node; no
    /// receipt is awaited.
    fn transfer(
        &self,
        token: Address,
        to: Address,
        amount_raw: U256,
    ) -> BoxFuture<'_, ChainResult<TxHash>>;

    /// Query the token contract's `decimals()`.
    fn token_decimals(&self, token: Address) -> BoxFuture<'_, ChainResult<u8>>;
}

/// Arc wrapper for wallet trait objects.
pub type DynWallet = Arc<dyn Wallet>;

/// Recorded transfer from the mock wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTransfer {
    pub token: Address,
    pub to: Address,
    pub amount_raw: U256,
}

/// Mock wallet for testing.
pub struct MockWallet {
    address: Address,
    chain_id: AtomicU64,
    transfers: Mutex<Vec<RecordedTransfer>>,
    decimals: Mutex<std::collections::HashMap<Address, u8>>,
    fail_next_transfer: Mutex<Option<String>>,
}

impl MockWallet {
    /// Create a mock wallet pinned to a chain id.
    pub fn new(chain_id: u64) -> Self {
        Self {
            address: Address::repeat_byte(0xAA),
            chain_id: AtomicU64::new(chain_id),
            transfers: Mutex::new(Vec::new()),
            decimals: Mutex::new(std::collections::HashMap::new()),
            fail_next_transfer: Mutex::new(None),
        }
    }

    /// Move the mock to a different chain.
    pub fn set_chain_id(&self, chain_id: u64) {
        self.chain_id.store(chain_id, Ordering::SeqCst);
    }

    /// Script the decimals for a token contract.
    pub fn set_decimals(&self, token: Address, decimals: u8) {
        self.decimals.lock().insert(token, decimals);
    }

    /// Make the next transfer fail with the given RPC message.
    pub fn fail_next_transfer(&self, message: impl Into<String>) {
        *self.fail_next_transfer.lock() = Some(message.into());
    }

    /// Transfers submitted so far.
    pub fn recorded_transfers(&self) -> Vec<RecordedTransfer> {
        self.transfers.lock().clone()
    }
}

impl Wallet for MockWallet {
    fn address(&self) -> Address {
        self.address
    }

    fn chain_id(&self) -> BoxFuture<'_, ChainResult<u64>> {
        let chain_id = self.chain_id.load(Ordering::SeqCst);
        Box::pin(async move { Ok(chain_id) })
    }

    fn transfer(
        &self,
        token: Address,
        to: Address,
        amount_raw: U256,
    ) -> BoxFuture<'_, ChainResult<TxHash>> {
        Box::pin(async move {
            if let Some(message) = self.fail_next_transfer.lock().take() {
                return Err(ChainError::Rpc(message));
            }
            self.transfers.lock().push(RecordedTransfer {
                token,
                to,
                amount_raw,
            });
            Ok(TxHash::repeat_byte(0x11))
        })
    }

    fn token_decimals(&self, token: Address) -> BoxFuture<'_, ChainResult<u8>> {
        let decimals = self.decimals.lock().get(&token).copied();
        Box::pin(async move {
            decimals.ok_or_else(|| ChainError::Rpc(format!("no decimals scripted for {token}")))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_transfers() {
        let wallet = MockWallet::new(42220);
        let token = Address::repeat_byte(0x01);
        let to = Address::repeat_byte(0x02);

        let hash = wallet
            .transfer(token, to, U256::from(50_000_000u64))
            .await
            .unwrap();
        assert_eq!(hash, TxHash::repeat_byte(0x11));

        let recorded = wallet.recorded_transfers();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].amount_raw, U256::from(50_000_000u64));
    }

    #[tokio::test]
    async fn test_mock_scripted_failure() {
        let wallet = MockWallet::new(42220);
        wallet.fail_next_transfer("user rejected");

        let result = wallet
            .transfer(
                Address::repeat_byte(0x01),
                Address::repeat_byte(0x02),
                U256::from(1u64),
            )
            .await;
        assert!(matches!(result, Err(ChainError::Rpc(_))));
        assert!(wallet.recorded_transfers().is_empty());

        // Failure is one-shot.
        assert!(wallet
            .transfer(
                Address::repeat_byte(0x01),
                Address::repeat_byte(0x02),
                U256::from(1u64),
            )
            .await
            .is_ok());
    }
}
