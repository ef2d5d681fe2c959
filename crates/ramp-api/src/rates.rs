//! Fiat conversion rate client.

use crate::envelope::ApiEnvelope;
use crate::error::{ApiError, ApiResult};
use crate::{http, BoxFuture};
use ramp_core::{Amount, TokenSymbol};
use reqwest::Client;
use rust_decimal::Decimal;
use tracing::debug;

/// Source of fiat conversion rates.
///
/// The HTTP client implements this; tests substitute scripted sources.
pub trait RateSource: Send + Sync {
    /// Fetch the fiat rate (fiat units per 1 token) for a (token, amount)
    /// pair.
    fn fetch_rate(
        &self,
        token: &TokenSymbol,
        amount: Amount,
        currency: &str,
    ) -> BoxFuture<'_, ApiResult<Decimal>>;
}

/// Rate client for the quote service.
pub struct HttpRateClient {
    client: Client,
    base_url: String,
}

impl HttpRateClient {
    /// Create a new rate client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the rate service (e.g. "https://api.paycrest.io")
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        Ok(Self {
            client: http::build_client()?,
            base_url: base_url.into(),
        })
    }

    async fn fetch(
        &self,
        token: &TokenSymbol,
        amount: Amount,
        currency: &str,
    ) -> ApiResult<Decimal> {
        let url = format!("{}/v1/rates/{token}/{amount}/{currency}", self.base_url);
        debug!(%url, "Fetching fiat rate");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Http(format!("Rate request failed: {e}")))?;

        let envelope: ApiEnvelope<String> = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("Rate response: {e}")))?;

        let raw = envelope.into_data("rate")?;
        raw.parse::<Decimal>()
            .map_err(|e| ApiError::Decode(format!("Rate value {raw:?}: {e}")))
    }
}

impl RateSource for HttpRateClient {
    fn fetch_rate(
        &self,
        token: &TokenSymbol,
        amount: Amount,
        currency: &str,
    ) -> BoxFuture<'_, ApiResult<Decimal>> {
        let token = token.clone();
        let currency = currency.to_string();
        Box::pin(async move { self.fetch(&token, amount, &currency).await })
    }
}
