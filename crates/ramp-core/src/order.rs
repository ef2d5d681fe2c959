//! Payout order state machine and pre-submission quote.

use crate::{Amount, TokenSymbol};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Settlement status reported by the payout API.
///
/// Observed transitions: `initiated → pending | processing`,
/// `pending → processing → settled | failed`. `settled` and `failed` are
/// terminal; monitoring stops once either is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order accepted by the aggregator, not yet queued.
    Initiated,
    /// Waiting for the deposit to be observed.
    Pending,
    /// Deposit observed, fiat payout in flight.
    Processing,
    /// Fiat payout completed.
    Settled,
    /// Payout failed.
    Failed,
}

impl OrderStatus {
    /// Whether this status ends monitoring.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Settled | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initiated => "initiated",
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Settled => "settled",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payout order created with the aggregator.
///
/// Created once per confirmed submission. The `id` is cleared from active
/// state when a terminal status is reached or the flow is torn down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutOrder {
    /// Aggregator-assigned order id.
    pub id: String,
    /// Custodial deposit address for the on-chain transfer.
    pub receive_address: String,
    /// Last observed settlement status.
    pub status: OrderStatus,
    /// Fiat amount paid out, once known.
    pub amount_paid: Option<Decimal>,
    /// Settlement transaction hash, once known.
    pub settlement_tx_hash: Option<String>,
    /// When the order was created locally.
    pub created_at: DateTime<Utc>,
}

impl PayoutOrder {
    /// Create a freshly-submitted order in `pending` state.
    pub fn pending(id: impl Into<String>, receive_address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            receive_address: receive_address.into(),
            status: OrderStatus::Pending,
            amount_paid: None,
            settlement_tx_hash: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// A fiat conversion quote for a (token, amount) pair.
///
/// Ephemeral: recomputed whenever amount or token changes, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Token being sold.
    pub source_token: TokenSymbol,
    /// Token amount being sold.
    pub source_amount: Amount,
    /// Fiat units per 1 token.
    pub fiat_rate: Decimal,
    /// When the rate was fetched.
    pub fetched_at: DateTime<Utc>,
}

impl Quote {
    pub fn new(source_token: TokenSymbol, source_amount: Amount, fiat_rate: Decimal) -> Self {
        Self {
            source_token,
            source_amount,
            fiat_rate,
            fetched_at: Utc::now(),
        }
    }

    /// Total fiat value of the quoted amount.
    pub fn fiat_value(&self) -> Decimal {
        self.source_amount.fiat_value(self.fiat_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Settled.is_terminal());
        assert!(OrderStatus::Failed.is_terminal());
        assert!(!OrderStatus::Initiated.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Processing.is_terminal());
    }

    #[test]
    fn test_status_serde_wire_names() {
        let json = serde_json::to_string(&OrderStatus::Processing).unwrap();
        assert_eq!(json, r#""processing""#);
        let status: OrderStatus = serde_json::from_str(r#""settled""#).unwrap();
        assert_eq!(status, OrderStatus::Settled);
    }

    #[test]
    fn test_quote_fiat_value() {
        let quote = Quote::new(
            TokenSymbol::new("USDC").unwrap(),
            Amount::new(dec!(50)),
            dec!(1520.10),
        );
        assert_eq!(quote.fiat_value(), dec!(76005.00));
    }

    #[test]
    fn test_pending_order() {
        let order = PayoutOrder::pending("ord_1", "0xabc");
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(!order.is_terminal());
        assert!(order.amount_paid.is_none());
    }
}
