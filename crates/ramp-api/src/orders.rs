//! Payout order creation and status lookup.

use crate::envelope::ApiEnvelope;
use crate::error::{ApiError, ApiResult};
use crate::{http, BoxFuture};
use ramp_core::{Amount, Beneficiary, Network, OrderStatus, TokenSymbol};
use reqwest::Client;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Payout recipient in the order creation body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecipient {
    pub institution: String,
    pub account_identifier: String,
    pub currency: String,
}

/// Order creation request body.
///
/// `amount` goes over the wire as a JSON number, matching what the
/// aggregator expects.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest {
    pub amount: f64,
    pub token: String,
    pub network: String,
    pub recipient: OrderRecipient,
}

impl CreateOrderRequest {
    pub fn new(
        amount: Amount,
        token: &TokenSymbol,
        network: Network,
        beneficiary: &Beneficiary,
        currency: &str,
    ) -> Self {
        Self {
            amount: amount.inner().to_f64().unwrap_or(0.0),
            token: token.to_string(),
            network: network.payout_name().to_string(),
            recipient: OrderRecipient {
                institution: beneficiary.institution_code.clone(),
                account_identifier: beneficiary.account_identifier.clone(),
                currency: currency.to_string(),
            },
        }
    }
}

/// Order id and deposit address returned on creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrder {
    pub id: String,
    pub receive_address: String,
}

/// One settlement status observation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusSnapshot {
    pub status: OrderStatus,
    #[serde(default)]
    pub amount_paid: Option<Decimal>,
    #[serde(default)]
    pub tx_hash: Option<String>,
}

/// Order creation response: the envelope is nested one level under `order`.
#[derive(Debug, Deserialize)]
struct CreateOrderResponse {
    #[serde(default)]
    order: Option<ApiEnvelope<CreatedOrder>>,
    #[serde(default)]
    message: Option<String>,
}

/// Payout order operations.
///
/// The HTTP client implements this; the settlement monitor and tests only
/// see the trait.
pub trait OrderApi: Send + Sync {
    fn create_order(&self, request: CreateOrderRequest) -> BoxFuture<'_, ApiResult<CreatedOrder>>;

    fn order_status(&self, order_id: &str) -> BoxFuture<'_, ApiResult<OrderStatusSnapshot>>;
}

/// Client for the aggregator's payout endpoints.
pub struct HttpOrderClient {
    client: Client,
    base_url: String,
}

impl HttpOrderClient {
    /// Create a new order client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the aggregator wrapper.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        Ok(Self {
            client: http::build_client()?,
            base_url: base_url.into(),
        })
    }

    async fn create(&self, request: CreateOrderRequest) -> ApiResult<CreatedOrder> {
        let url = format!("{}/payment", self.base_url);
        info!(
            token = %request.token,
            network = %request.network,
            amount = request.amount,
            "Creating payout order"
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::Http(format!("Order request failed: {e}")))?;

        let body: CreateOrderResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("Order response: {e}")))?;

        match body.order {
            Some(envelope) if envelope.is_success() => envelope.into_data("order"),
            Some(envelope) => Err(ApiError::Rejected(
                envelope
                    .message
                    .or(body.message)
                    .unwrap_or_else(|| "Failed to create payment".to_string()),
            )),
            None => Err(ApiError::Rejected(
                body.message
                    .unwrap_or_else(|| "Failed to create payment".to_string()),
            )),
        }
    }

    async fn status(&self, order_id: &str) -> ApiResult<OrderStatusSnapshot> {
        let url = format!("{}/payment/orders/{order_id}", self.base_url);
        debug!(%url, "Polling order status");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Http(format!("Status request failed: {e}")))?;

        let envelope: ApiEnvelope<OrderStatusSnapshot> = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("Status response: {e}")))?;

        envelope.into_data("order-status")
    }
}

impl OrderApi for HttpOrderClient {
    fn create_order(&self, request: CreateOrderRequest) -> BoxFuture<'_, ApiResult<CreatedOrder>> {
        Box::pin(async move { self.create(request).await })
    }

    fn order_status(&self, order_id: &str) -> BoxFuture<'_, ApiResult<OrderStatusSnapshot>> {
        let order_id = order_id.to_string();
        Box::pin(async move { self.status(&order_id).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_request_wire_shape() {
        let beneficiary = Beneficiary::new("0123456789", "GTB");
        let request = CreateOrderRequest::new(
            Amount::new(dec!(50)),
            &TokenSymbol::new("USDC").unwrap(),
            Network::Celo,
            &beneficiary,
            "NGN",
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["amount"], serde_json::json!(50.0));
        assert_eq!(json["token"], "USDC");
        assert_eq!(json["network"], "celo");
        assert_eq!(json["recipient"]["institution"], "GTB");
        assert_eq!(json["recipient"]["accountIdentifier"], "0123456789");
        assert_eq!(json["recipient"]["currency"], "NGN");
    }

    #[test]
    fn test_testnet_maps_to_mainnet_payout_name() {
        let beneficiary = Beneficiary::new("0123456789", "GTB");
        let request = CreateOrderRequest::new(
            Amount::new(dec!(10)),
            &TokenSymbol::new("USDC").unwrap(),
            Network::BaseSepolia,
            &beneficiary,
            "NGN",
        );
        assert_eq!(request.network, "base");
    }

    #[test]
    fn test_created_order_decoding() {
        let body = r#"{"order":{"status":"success","data":{"id":"ord_1","receiveAddress":"0xdeposit"}}}"#;
        let response: CreateOrderResponse = serde_json::from_str(body).unwrap();
        let order = response.order.unwrap().into_data("order").unwrap();
        assert_eq!(order.id, "ord_1");
        assert_eq!(order.receive_address, "0xdeposit");
    }

    #[test]
    fn test_create_failure_decoding() {
        let body = r#"{"order":{"status":"error"},"message":"insufficient liquidity"}"#;
        let response: CreateOrderResponse = serde_json::from_str(body).unwrap();
        assert!(!response.order.as_ref().unwrap().is_success());
        assert_eq!(response.message.as_deref(), Some("insufficient liquidity"));
    }

    #[test]
    fn test_status_snapshot_decoding() {
        let body =
            r#"{"status":"success","data":{"status":"settled","amountPaid":"76005.00","txHash":"0xsettle"}}"#;
        let envelope: ApiEnvelope<OrderStatusSnapshot> = serde_json::from_str(body).unwrap();
        let snapshot = envelope.into_data("order-status").unwrap();
        assert_eq!(snapshot.status, OrderStatus::Settled);
        assert_eq!(snapshot.amount_paid, Some(dec!(76005.00)));
        assert_eq!(snapshot.tx_hash.as_deref(), Some("0xsettle"));
    }

    #[test]
    fn test_status_snapshot_minimal() {
        let body = r#"{"status":"success","data":{"status":"pending"}}"#;
        let envelope: ApiEnvelope<OrderStatusSnapshot> = serde_json::from_str(body).unwrap();
        let snapshot = envelope.into_data("order-status").unwrap();
        assert_eq!(snapshot.status, OrderStatus::Pending);
        assert!(snapshot.amount_paid.is_none());
        assert!(snapshot.tx_hash.is_none());
    }
}
