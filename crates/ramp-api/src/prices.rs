//! USD token prices from the public price API.

use crate::error::{ApiError, ApiResult};
use crate::http;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Tokens the aggregator accepts for swaps, with their price-API ids.
const TOKEN_CONFIGS: [(&str, &str, &str); 3] = [
    ("USDC", "USD Coin", "usd-coin"),
    ("USDT", "Tether USD", "tether"),
    ("CUSD", "Celo Dollar", "celo-dollar"),
];

/// USD price of one supported token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenPrice {
    pub symbol: String,
    pub name: String,
    pub usd_price: Decimal,
}

/// Client for the simple-price endpoint.
pub struct PriceClient {
    client: Client,
    base_url: String,
}

impl PriceClient {
    /// Create a new price client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the price API (e.g. "https://api.coingecko.com")
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        Ok(Self {
            client: http::build_client()?,
            base_url: base_url.into(),
        })
    }

    /// Fetch USD prices for the supported token set.
    pub async fn fetch_prices(&self) -> ApiResult<Vec<TokenPrice>> {
        let ids: Vec<&str> = TOKEN_CONFIGS.iter().map(|(_, _, id)| *id).collect();
        let url = format!(
            "{}/api/v3/simple/price?ids={}&vs_currencies=usd",
            self.base_url,
            ids.join(",")
        );
        debug!(%url, "Fetching token prices");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Http(format!("Price request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ApiError::Http(format!(
                "Price request failed: HTTP {}",
                response.status()
            )));
        }

        let body: HashMap<String, HashMap<String, Decimal>> = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("Price response: {e}")))?;

        Ok(TOKEN_CONFIGS
            .iter()
            .map(|(symbol, name, id)| TokenPrice {
                symbol: symbol.to_string(),
                name: name.to_string(),
                usd_price: body
                    .get(*id)
                    .and_then(|prices| prices.get("usd"))
                    .copied()
                    .unwrap_or(Decimal::ZERO),
            })
            .collect())
    }

    /// Zero-priced entries used when the price API is unreachable.
    pub fn fallback_prices() -> Vec<TokenPrice> {
        TOKEN_CONFIGS
            .iter()
            .map(|(symbol, name, _)| TokenPrice {
                symbol: symbol.to_string(),
                name: name.to_string(),
                usd_price: Decimal::ZERO,
            })
            .collect()
    }

    /// Fetch prices, falling back to zero-priced entries on failure.
    pub async fn fetch_or_fallback(&self) -> Vec<TokenPrice> {
        match self.fetch_prices().await {
            Ok(prices) => prices,
            Err(err) => {
                warn!(error = %err, "Price fetch failed, using fallback prices");
                Self::fallback_prices()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fallback_covers_all_tokens() {
        let prices = PriceClient::fallback_prices();
        let symbols: Vec<&str> = prices.iter().map(|p| p.symbol.as_str()).collect();
        assert_eq!(symbols, ["USDC", "USDT", "CUSD"]);
        assert!(prices.iter().all(|p| p.usd_price.is_zero()));
    }

    #[test]
    fn test_price_body_decoding() {
        let body = r#"{"usd-coin":{"usd":1.0},"tether":{"usd":0.999},"celo-dollar":{"usd":1.001}}"#;
        let parsed: HashMap<String, HashMap<String, Decimal>> =
            serde_json::from_str(body).unwrap();
        assert_eq!(parsed["usd-coin"]["usd"], dec!(1.0));
        assert_eq!(parsed["celo-dollar"]["usd"], dec!(1.001));
    }
}
