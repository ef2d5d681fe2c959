//! Split-factory client.
//!
//! Creates and lists payment-split contracts through the per-network factory
//! deployments. Percentage validation happens client-side before any chain
//! call; the factory expects basis points (percent × 100).

use crate::error::{ChainError, ChainResult};
use crate::signer::KeyManager;
use alloy::network::EthereumWallet;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::ProviderBuilder;
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;
use alloy::transports::http::reqwest::Url;
use ramp_core::Network;
use ramp_registry::FactoryRegistry;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::info;

sol! {
    #[sol(rpc)]
    contract SplitFactory {
        function createSplit(address token, address[] recipients, uint256[] percentages) external returns (address);
        function totalSplitsCreated() external view returns (uint256);
        function splits(uint256 index) external view returns (address);
    }
}

/// A split definition as entered by the user.
#[derive(Debug, Clone)]
pub struct SplitSpec {
    /// Token the split distributes (zero address for the native token).
    pub token: Address,
    pub recipients: Vec<Address>,
    /// Whole-percent shares; must sum to exactly 100.
    pub percentages: Vec<Decimal>,
}

impl SplitSpec {
    /// Validate the spec and scale percentages to basis points.
    pub fn validate(&self) -> ChainResult<Vec<U256>> {
        if self.recipients.is_empty() {
            return Err(ChainError::InvalidRecipients(
                "at least one recipient is required".to_string(),
            ));
        }
        if self.recipients.len() != self.percentages.len() {
            return Err(ChainError::InvalidRecipients(format!(
                "{} recipients but {} percentages",
                self.recipients.len(),
                self.percentages.len()
            )));
        }
        if self.percentages.iter().any(|p| *p <= Decimal::ZERO) {
            return Err(ChainError::InvalidPercentages(
                "each share must be positive".to_string(),
            ));
        }

        let total: Decimal = self.percentages.iter().sum();
        if total != Decimal::from(100) {
            return Err(ChainError::InvalidPercentages(format!(
                "shares must sum to 100%, got {total}%"
            )));
        }

        self.percentages
            .iter()
            .map(|p| {
                (*p * Decimal::from(100))
                    .round()
                    .to_u64()
                    .map(U256::from)
                    .ok_or_else(|| {
                        ChainError::InvalidPercentages(format!("share {p} cannot be scaled"))
                    })
            })
            .collect()
    }
}

/// Client for the split-factory contracts.
pub struct SplitFactoryClient {
    factories: FactoryRegistry,
    signer: PrivateKeySigner,
    rpc_url: String,
}

impl SplitFactoryClient {
    pub fn new(factories: FactoryRegistry, keys: &KeyManager, rpc_url: impl Into<String>) -> Self {
        Self {
            factories,
            signer: keys.signer().clone(),
            rpc_url: rpc_url.into(),
        }
    }

    fn parse_url(&self) -> ChainResult<Url> {
        self.rpc_url
            .parse()
            .map_err(|_| ChainError::Rpc(format!("Invalid RPC URL {:?}", self.rpc_url)))
    }

    /// Create a split contract; returns the creation transaction hash.
    pub async fn create_split(&self, network: Network, spec: &SplitSpec) -> ChainResult<TxHash> {
        let scaled = spec.validate()?;
        let factory_address = self.factories.require(network)?;

        let url = self.parse_url()?;
        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(EthereumWallet::from(self.signer.clone()))
            .on_http(url);

        let factory = SplitFactory::new(factory_address, &provider);
        let pending = factory
            .createSplit(spec.token, spec.recipients.clone(), scaled)
            .send()
            .await
            .map_err(|e| ChainError::Rpc(format!("createSplit failed: {e}")))?;

        let tx_hash = *pending.tx_hash();
        info!(
            network = %network,
            recipients = spec.recipients.len(),
            %tx_hash,
            "Split creation submitted"
        );
        Ok(tx_hash)
    }

    /// List every split the factory has created, in creation order.
    pub async fn fetch_splits(&self, network: Network) -> ChainResult<Vec<Address>> {
        let factory_address = self.factories.require(network)?;
        let url = self.parse_url()?;
        let provider = ProviderBuilder::new().on_http(url);
        let factory = SplitFactory::new(factory_address, &provider);

        let total = factory
            .totalSplitsCreated()
            .call()
            .await
            .map_err(|e| ChainError::Rpc(format!("totalSplitsCreated failed: {e}")))?
            ._0;

        let count = total.to::<u64>();
        let mut addresses = Vec::with_capacity(count as usize);
        for index in 0..count {
            let split = factory
                .splits(U256::from(index))
                .call()
                .await
                .map_err(|e| ChainError::Rpc(format!("splits({index}) failed: {e}")))?
                ._0;
            addresses.push(split);
        }
        Ok(addresses)
    }
}
