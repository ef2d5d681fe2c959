//! Settlement polling loop.

use crate::active::ActiveOrderSlot;
use crate::notifier::Notifier;
use ramp_api::OrderApi;
use ramp_core::OrderStatus;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Polling configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Interval between status polls. Default: 5 seconds.
    pub poll_interval: Duration,
    /// Maximum polls before giving up. Default: 120 (10 minutes at 5 s).
    pub max_attempts: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            max_attempts: 120,
        }
    }
}

/// How a monitoring run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementOutcome {
    /// Payout completed.
    Settled,
    /// Payout failed.
    Failed,
    /// No terminal state within the attempt cap; order left to manual review.
    Stuck,
    /// The active order was cleared externally; polling stopped.
    Cancelled,
}

/// Polls order status until a terminal state, the attempt cap, or an
/// external cancellation.
///
/// Transient fetch errors are logged and retried on the next tick. Terminal
/// transitions notify exactly once and release the active-order slot; no
/// request is issued after the terminal poll.
pub struct SettlementMonitor {
    orders: Arc<dyn OrderApi>,
    notifier: Arc<dyn Notifier>,
    slot: ActiveOrderSlot,
    config: MonitorConfig,
}

impl SettlementMonitor {
    pub fn new(
        orders: Arc<dyn OrderApi>,
        notifier: Arc<dyn Notifier>,
        slot: ActiveOrderSlot,
        config: MonitorConfig,
    ) -> Self {
        Self {
            orders,
            notifier,
            slot,
            config,
        }
    }

    /// Monitor one order to completion.
    pub async fn run(&self, order_id: &str) -> SettlementOutcome {
        info!(%order_id, "Monitoring payment settlement");

        for attempt in 0..self.config.max_attempts {
            // Liveness check before every poll: an external clear (e.g. a
            // disconnect) must stop the loop without another request.
            if !self.slot.is_active(order_id) {
                info!(%order_id, "Active order cleared, stopping settlement monitor");
                return SettlementOutcome::Cancelled;
            }

            match self.orders.order_status(order_id).await {
                Ok(snapshot) => {
                    self.slot.record_status(order_id, &snapshot);
                    match snapshot.status {
                        OrderStatus::Settled => {
                            self.notifier.success("Payment completed successfully!");
                            self.slot.clear();
                            return SettlementOutcome::Settled;
                        }
                        OrderStatus::Failed => {
                            self.notifier.failure("Payment settlement failed");
                            self.slot.clear();
                            return SettlementOutcome::Failed;
                        }
                        OrderStatus::Processing => {
                            self.notifier.info("Payment is being processed...");
                        }
                        OrderStatus::Pending => {
                            self.notifier.info("Payment is pending settlement...");
                        }
                        OrderStatus::Initiated => {
                            self.notifier
                                .info("Payment order initiated, waiting for processing...");
                        }
                    }
                }
                Err(err) => {
                    warn!(%order_id, attempt, error = %err, "Settlement status check failed");
                }
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }

        self.notifier.stuck(
            "Settlement status unknown: polling cap reached; check the order manually",
        );
        self.slot.clear();
        SettlementOutcome::Stuck
    }
}
