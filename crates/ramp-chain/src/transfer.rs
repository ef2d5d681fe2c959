//! Fund transfer to the custodial deposit address.

use crate::error::{ChainError, ChainResult};
use crate::wallet::Wallet;
use alloy::primitives::{Address, TxHash, U256};
use ramp_core::{Amount, Network, TokenSymbol};
use ramp_registry::{TokenRegistry, TransferRecord};
use tracing::{info, warn};

/// Result of a submitted transfer.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    pub tx_hash: TxHash,
    pub record: TransferRecord,
}

/// Executes the on-chain leg of a payout.
///
/// Preconditions are checked in order, each with its own failure mode: a
/// wallet must be connected, it must sit on the expected network, and the
/// token must exist in that network's table. The transfer itself is
/// fire-and-forget: the hash is surfaced without waiting for confirmation,
/// so an already-created payout order can be left orphaned if the transfer
/// later fails on-chain.
pub struct FundTransfer {
    registry: TokenRegistry,
    network: Network,
}

impl FundTransfer {
    pub fn new(registry: TokenRegistry, network: Network) -> Self {
        Self { registry, network }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Submit the transfer for `amount` of `token` to `receive_address`.
    pub async fn execute(
        &self,
        wallet: Option<&dyn Wallet>,
        receive_address: &str,
        token: &TokenSymbol,
        amount: Amount,
    ) -> ChainResult<TransferOutcome> {
        let wallet = wallet.ok_or(ChainError::WalletNotConnected)?;

        let to: Address = receive_address
            .parse()
            .map_err(|_| ChainError::InvalidAddress(receive_address.to_string()))?;

        let chain_id = wallet.chain_id().await?;
        if chain_id != self.network.chain_id() {
            warn!(
                expected = %self.network,
                actual_chain_id = chain_id,
                "Wallet is on the wrong network"
            );
            return Err(ChainError::WrongNetwork {
                expected: self.network,
                actual_chain_id: chain_id,
            });
        }

        let record = self.registry.transfer_record(self.network, token, amount)?;

        let tx_hash = wallet
            .transfer(record.token_address, to, U256::from(record.amount_raw))
            .await?;

        info!(
            %token,
            network = %self.network,
            amount = %amount,
            amount_raw = record.amount_raw,
            %tx_hash,
            "Token transfer submitted"
        );

        Ok(TransferOutcome { tx_hash, record })
    }

    /// Check the registry's decimals against the token contract.
    ///
    /// Catches table drift before it can misprice a transfer by a power of
    /// ten.
    pub async fn verify_decimals(
        &self,
        wallet: &dyn Wallet,
        token: &TokenSymbol,
    ) -> ChainResult<()> {
        let entry = self.registry.require(self.network, token)?;
        let onchain = wallet.token_decimals(entry.address).await?;
        if onchain != entry.decimals {
            return Err(ChainError::DecimalsMismatch {
                token: token.to_string(),
                network: self.network,
                table: entry.decimals,
                onchain,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::MockWallet;
    use alloy::primitives::address;
    use rust_decimal_macros::dec;

    const RECEIVE: &str = "0x00000000000000000000000000000000000000b1";

    fn sym(s: &str) -> TokenSymbol {
        TokenSymbol::new(s).unwrap()
    }

    fn celo_transfer() -> FundTransfer {
        FundTransfer::new(TokenRegistry::bundled(), Network::Celo)
    }

    #[tokio::test]
    async fn test_requires_wallet() {
        let transfer = celo_transfer();
        let result = transfer
            .execute(None, RECEIVE, &sym("USDC"), Amount::new(dec!(50)))
            .await;
        assert!(matches!(result, Err(ChainError::WalletNotConnected)));
    }

    #[tokio::test]
    async fn test_wrong_network_names_expected() {
        let transfer = celo_transfer();
        let wallet = MockWallet::new(Network::Base.chain_id());
        let err = transfer
            .execute(Some(&wallet), RECEIVE, &sym("USDC"), Amount::new(dec!(50)))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Celo"));
        assert!(wallet.recorded_transfers().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_token_names_symbol_and_network() {
        let transfer = celo_transfer();
        let wallet = MockWallet::new(Network::Celo.chain_id());
        let err = transfer
            .execute(Some(&wallet), RECEIVE, &sym("DAI"), Amount::new(dec!(50)))
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("DAI"));
        assert!(msg.contains("celo"));
        assert!(wallet.recorded_transfers().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_receive_address() {
        let transfer = celo_transfer();
        let wallet = MockWallet::new(Network::Celo.chain_id());
        let result = transfer
            .execute(
                Some(&wallet),
                "not-an-address",
                &sym("USDC"),
                Amount::new(dec!(50)),
            )
            .await;
        assert!(matches!(result, Err(ChainError::InvalidAddress(_))));
    }

    #[tokio::test]
    async fn test_usdc_transfer_uses_six_decimals() {
        let transfer = celo_transfer();
        let wallet = MockWallet::new(Network::Celo.chain_id());
        let outcome = transfer
            .execute(Some(&wallet), RECEIVE, &sym("USDC"), Amount::new(dec!(50)))
            .await
            .unwrap();

        assert_eq!(outcome.record.decimals, 6);
        let recorded = wallet.recorded_transfers();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].amount_raw, U256::from(50_000_000u64));
        assert_eq!(
            recorded[0].token,
            address!("cebA9300f2b948710d2653dD7B07f33A8B32118C")
        );
    }

    #[tokio::test]
    async fn test_cusd_transfer_uses_eighteen_decimals() {
        let transfer = celo_transfer();
        let wallet = MockWallet::new(Network::Celo.chain_id());
        let outcome = transfer
            .execute(Some(&wallet), RECEIVE, &sym("CUSD"), Amount::new(dec!(1.25)))
            .await
            .unwrap();

        assert_eq!(outcome.record.decimals, 18);
        assert_eq!(
            wallet.recorded_transfers()[0].amount_raw,
            U256::from(1_250_000_000_000_000_000u128)
        );
    }

    #[tokio::test]
    async fn test_verify_decimals_detects_drift() {
        let transfer = celo_transfer();
        let wallet = MockWallet::new(Network::Celo.chain_id());
        let usdc = address!("cebA9300f2b948710d2653dD7B07f33A8B32118C");

        wallet.set_decimals(usdc, 6);
        assert!(transfer.verify_decimals(&wallet, &sym("USDC")).await.is_ok());

        wallet.set_decimals(usdc, 18);
        let err = transfer
            .verify_decimals(&wallet, &sym("USDC"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChainError::DecimalsMismatch { .. }));
    }
}
