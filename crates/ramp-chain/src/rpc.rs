//! JSON-RPC wallet implementation.

use crate::error::{ChainError, ChainResult};
use crate::signer::KeyManager;
use crate::wallet::Wallet;
use crate::BoxFuture;
use alloy::network::EthereumWallet;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;
use alloy::transports::http::reqwest::Url;
use tracing::info;

sol! {
    #[sol(rpc)]
    contract Erc20 {
        function transfer(address to, uint256 value) external returns (bool);
        function decimals() external view returns (uint8);
        function balanceOf(address owner) external view returns (uint256);
    }
}

/// Wallet backed by a local signer and a JSON-RPC endpoint.
///
/// The provider is rebuilt per operation; the off-ramp flow submits a single
/// transfer per run.
pub struct RpcWallet {
    signer: PrivateKeySigner,
    address: Address,
    rpc_url: String,
}

impl RpcWallet {
    pub fn new(keys: &KeyManager, rpc_url: impl Into<String>) -> Self {
        Self {
            signer: keys.signer().clone(),
            address: keys.address(),
            rpc_url: rpc_url.into(),
        }
    }

    fn parse_url(&self) -> ChainResult<Url> {
        self.rpc_url
            .parse()
            .map_err(|_| ChainError::Rpc(format!("Invalid RPC URL {:?}", self.rpc_url)))
    }

    async fn do_transfer(&self, token: Address, to: Address, amount: U256) -> ChainResult<TxHash> {
        let url = self.parse_url()?;
        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(EthereumWallet::from(self.signer.clone()))
            .on_http(url);

        let erc20 = Erc20::new(token, &provider);
        let pending = erc20
            .transfer(to, amount)
            .send()
            .await
            .map_err(|e| ChainError::Rpc(format!("Transfer submission failed: {e}")))?;

        let tx_hash = *pending.tx_hash();
        info!(%token, %to, %amount, %tx_hash, "Transfer submitted");
        Ok(tx_hash)
    }

    async fn do_chain_id(&self) -> ChainResult<u64> {
        let url = self.parse_url()?;
        let provider = ProviderBuilder::new().on_http(url);
        provider
            .get_chain_id()
            .await
            .map_err(|e| ChainError::Rpc(format!("chain_id query failed: {e}")))
    }

    async fn do_decimals(&self, token: Address) -> ChainResult<u8> {
        let url = self.parse_url()?;
        let provider = ProviderBuilder::new().on_http(url);
        let erc20 = Erc20::new(token, &provider);
        let result = erc20
            .decimals()
            .call()
            .await
            .map_err(|e| ChainError::Rpc(format!("decimals query failed: {e}")))?;
        Ok(result._0)
    }
}

impl Wallet for RpcWallet {
    fn address(&self) -> Address {
        self.address
    }

    fn chain_id(&self) -> BoxFuture<'_, ChainResult<u64>> {
        Box::pin(self.do_chain_id())
    }

    fn transfer(
        &self,
        token: Address,
        to: Address,
        amount_raw: U256,
    ) -> BoxFuture<'_, ChainResult<TxHash>> {
        Box::pin(self.do_transfer(token, to, amount_raw))
    }

    fn token_decimals(&self, token: Address) -> BoxFuture<'_, ChainResult<u8>> {
        Box::pin(self.do_decimals(token))
    }
}
