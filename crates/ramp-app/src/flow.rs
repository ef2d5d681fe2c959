//! The confirmed-submission saga: order creation, fund transfer, settlement.
//!
//! Quote and beneficiary resolution run opportunistically before the user
//! confirms; once confirmed, the steps are strictly sequential: the order
//! must exist before the transfer is attempted, and the transfer must be
//! submitted before monitoring starts. A failure at any step aborts the
//! flow at that step.

use crate::error::{AppError, AppResult};
use alloy::primitives::TxHash;
use ramp_api::{
    BeneficiaryResolver, CreateOrderRequest, OrderApi, QuoteOutcome, RateQuoter,
};
use ramp_chain::{FundTransfer, Wallet};
use ramp_core::{Amount, Beneficiary, PayoutOrder, Quote, TokenSymbol};
use ramp_monitor::{
    ActiveOrderSlot, MonitorConfig, Notifier, SettlementMonitor, SettlementOutcome,
};
use std::sync::Arc;
use tracing::{info, warn};

/// One payout request as entered by the user.
#[derive(Debug, Clone)]
pub struct OfframpRequest {
    pub token: TokenSymbol,
    /// Raw amount string; must parse to a positive number.
    pub amount_input: String,
    pub account_identifier: String,
    pub institution_code: String,
}

/// Everything the flow produced for one completed run.
#[derive(Debug, Clone)]
pub struct OfframpReceipt {
    pub order_id: String,
    pub receive_address: String,
    pub quote: Quote,
    pub transfer_tx: TxHash,
    pub outcome: SettlementOutcome,
}

/// Orchestrates one off-ramp payout end to end.
pub struct OfframpFlow {
    quoter: RateQuoter,
    resolver: BeneficiaryResolver,
    orders: Arc<dyn OrderApi>,
    wallet: Option<Arc<dyn Wallet>>,
    transfer: FundTransfer,
    notifier: Arc<dyn Notifier>,
    slot: ActiveOrderSlot,
    monitor_config: MonitorConfig,
    currency: String,
}

impl OfframpFlow {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        quoter: RateQuoter,
        resolver: BeneficiaryResolver,
        orders: Arc<dyn OrderApi>,
        wallet: Option<Arc<dyn Wallet>>,
        transfer: FundTransfer,
        notifier: Arc<dyn Notifier>,
        slot: ActiveOrderSlot,
        monitor_config: MonitorConfig,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            quoter,
            resolver,
            orders,
            wallet,
            transfer,
            notifier,
            slot,
            monitor_config,
            currency: currency.into(),
        }
    }

    /// The shared active-order slot.
    pub fn slot(&self) -> &ActiveOrderSlot {
        &self.slot
    }

    /// Run the full payout: quote → verify → order → transfer → settle.
    pub async fn run(&self, request: &OfframpRequest) -> AppResult<OfframpReceipt> {
        let amount = Amount::parse_positive(&request.amount_input).ok_or_else(|| {
            AppError::InvalidInput("Please enter a valid amount and wait for rate".to_string())
        })?;

        // An order may only be created after a quote exists.
        let quote = match self.quoter.quote(&request.token, &request.amount_input).await {
            QuoteOutcome::Quoted(quote) => quote,
            QuoteOutcome::Failed(message) => {
                return Err(ramp_api::ApiError::Rejected(message).into())
            }
            QuoteOutcome::Cleared | QuoteOutcome::Superseded => {
                return Err(AppError::InvalidInput(
                    "Please enter a valid amount and wait for rate".to_string(),
                ))
            }
        };
        self.notifier.info(&format!(
            "Rate: 1 {} = {} {}",
            quote.source_token, quote.fiat_rate, self.currency
        ));

        // Submission is blocked until the account name resolves.
        let mut beneficiary = Beneficiary::new(
            request.account_identifier.clone(),
            request.institution_code.clone(),
        );
        let resolved_name = self.resolver.resolve(&mut beneficiary).await.ok_or_else(|| {
            AppError::InvalidInput("Could not verify account name. Please try again.".to_string())
        })?;
        self.notifier.info(&format!("Sending to {resolved_name}"));

        // Reject resubmission while another order is active, before anything
        // is created server-side.
        if let Some(active) = self.slot.current() {
            return Err(ramp_monitor::MonitorError::OrderAlreadyActive(active.id).into());
        }

        self.notifier.info("Creating payment order...");
        let created = self
            .orders
            .create_order(CreateOrderRequest::new(
                amount,
                &request.token,
                self.transfer.network(),
                &beneficiary,
                &self.currency,
            ))
            .await?;
        self.slot
            .claim(PayoutOrder::pending(&created.id, &created.receive_address))?;
        self.notifier.info("Payment order initiated successfully");

        self.notifier
            .info("Please confirm the token transfer in your wallet...");
        let transfer_outcome = match self
            .transfer
            .execute(
                self.wallet.as_deref(),
                &created.receive_address,
                &request.token,
                amount,
            )
            .await
        {
            Ok(outcome) => outcome,
            Err(err) => {
                // The order already exists server-side with no deposit; the
                // backend's expiry reconciles it.
                warn!(
                    order_id = %created.id,
                    error = %err,
                    "Transfer failed after order creation; pending order left for backend expiry"
                );
                self.slot.clear();
                self.notifier.failure(&err.to_string());
                return Err(err.into());
            }
        };
        self.notifier.success(&format!(
            "Tokens transferred successfully! TX: {:#x}",
            transfer_outcome.tx_hash
        ));

        self.notifier.info("Monitoring payment settlement...");
        let monitor = SettlementMonitor::new(
            self.orders.clone(),
            self.notifier.clone(),
            self.slot.clone(),
            self.monitor_config,
        );
        let outcome = monitor.run(&created.id).await;

        info!(order_id = %created.id, ?outcome, "Off-ramp flow finished");
        Ok(OfframpReceipt {
            order_id: created.id,
            receive_address: created.receive_address,
            quote,
            transfer_tx: transfer_outcome.tx_hash,
            outcome,
        })
    }
}
