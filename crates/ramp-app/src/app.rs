//! Application wiring.

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::flow::OfframpFlow;
use ramp_api::{
    BeneficiaryResolver, HttpAccountVerifier, HttpOrderClient, HttpRateClient, Institution,
    InstitutionClient, PriceClient, RateQuoter, TokenPrice,
};
use ramp_chain::{
    FundTransfer, KeyManager, KeySource, RpcWallet, SplitFactoryClient, Wallet,
};
use ramp_monitor::{ActiveOrderSlot, LogNotifier};
use ramp_registry::TokenRegistry;
use std::sync::Arc;
use tracing::info;

/// Wires configuration into clients and flows.
pub struct Application {
    config: AppConfig,
}

impl Application {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Load the payout key and build the RPC wallet.
    pub fn connect_wallet(&self) -> AppResult<Arc<dyn Wallet>> {
        let expected = match &self.config.signer_address {
            Some(address) => Some(address.parse().map_err(|_| {
                AppError::Config(format!("Invalid signer_address {address:?}"))
            })?),
            None => None,
        };
        let keys = KeyManager::load(
            KeySource::EnvVar {
                var_name: self.config.payout_key_env.clone(),
            },
            expected,
        )
        .map_err(ramp_chain::ChainError::Key)?;
        info!(address = %keys.address(), network = %self.config.network, "Wallet loaded");
        Ok(Arc::new(RpcWallet::new(&keys, self.config.rpc_url())))
    }

    /// Build the off-ramp flow over the production HTTP clients.
    ///
    /// `wallet` is optional so quote/verify paths work unconnected; the
    /// transfer step fails cleanly without one.
    pub fn build_flow(&self, wallet: Option<Arc<dyn Wallet>>) -> AppResult<OfframpFlow> {
        let quoter = RateQuoter::new(
            Arc::new(HttpRateClient::new(&self.config.rate_base_url)?),
            &self.config.fiat_currency,
        );
        let resolver = BeneficiaryResolver::new(Arc::new(HttpAccountVerifier::new(
            &self.config.aggregator_base_url,
        )?));
        let orders = Arc::new(HttpOrderClient::new(&self.config.aggregator_base_url)?);
        let transfer = FundTransfer::new(TokenRegistry::bundled(), self.config.network);

        Ok(OfframpFlow::new(
            quoter,
            resolver,
            orders,
            wallet,
            transfer,
            Arc::new(LogNotifier),
            ActiveOrderSlot::new(),
            self.config.monitor_config(),
            self.config.fiat_currency.clone(),
        ))
    }

    /// Quote a token amount against the configured fiat currency.
    ///
    /// Returns `None` for input that parses to a non-positive amount.
    pub async fn quote(
        &self,
        token: &ramp_core::TokenSymbol,
        amount: &str,
    ) -> AppResult<Option<ramp_core::Quote>> {
        let quoter = RateQuoter::new(
            Arc::new(HttpRateClient::new(&self.config.rate_base_url)?),
            &self.config.fiat_currency,
        );
        match quoter.quote(token, amount).await {
            ramp_api::QuoteOutcome::Quoted(quote) => Ok(Some(quote)),
            ramp_api::QuoteOutcome::Failed(message) => {
                Err(ramp_api::ApiError::Rejected(message).into())
            }
            ramp_api::QuoteOutcome::Cleared | ramp_api::QuoteOutcome::Superseded => Ok(None),
        }
    }

    /// Resolve a bank account to its holder name.
    pub async fn verify_account(
        &self,
        account: &str,
        bank_code: &str,
    ) -> AppResult<Option<String>> {
        let resolver = BeneficiaryResolver::new(Arc::new(HttpAccountVerifier::new(
            &self.config.aggregator_base_url,
        )?));
        let mut beneficiary = ramp_core::Beneficiary::new(account, bank_code);
        Ok(resolver.resolve(&mut beneficiary).await)
    }

    /// Fetch the bank directory for the configured currency.
    pub async fn fetch_institutions(&self) -> AppResult<Vec<Institution>> {
        let client = InstitutionClient::new(&self.config.aggregator_base_url)?;
        Ok(client.fetch_institutions(&self.config.fiat_currency).await?)
    }

    /// Fetch USD prices for the supported tokens, with zero-price fallback.
    pub async fn fetch_prices(&self) -> AppResult<Vec<TokenPrice>> {
        let client = PriceClient::new(&self.config.price_base_url)?;
        Ok(client.fetch_or_fallback().await)
    }

    /// Build the split-factory client for the configured network.
    pub fn split_factory(&self) -> AppResult<SplitFactoryClient> {
        let factories = self.config.factory_registry()?;
        let keys = KeyManager::load(
            KeySource::EnvVar {
                var_name: self.config.payout_key_env.clone(),
            },
            None,
        )
        .map_err(ramp_chain::ChainError::Key)?;
        Ok(SplitFactoryClient::new(factories, &keys, self.config.rpc_url()))
    }
}
