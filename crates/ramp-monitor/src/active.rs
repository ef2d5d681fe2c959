//! Single-active-order guard.

use crate::error::{MonitorError, MonitorResult};
use parking_lot::Mutex;
use ramp_api::OrderStatusSnapshot;
use ramp_core::PayoutOrder;
use std::sync::Arc;

/// Shared slot holding the one order allowed to be in flight.
///
/// Claimed by order creation, cleared by the monitor on terminal states or
/// externally on teardown. A second submission while the slot is occupied is
/// rejected. Cloning shares the slot.
#[derive(Debug, Clone, Default)]
pub struct ActiveOrderSlot {
    inner: Arc<Mutex<Option<PayoutOrder>>>,
}

impl ActiveOrderSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for a new order.
    pub fn claim(&self, order: PayoutOrder) -> MonitorResult<()> {
        let mut slot = self.inner.lock();
        if let Some(active) = slot.as_ref() {
            return Err(MonitorError::OrderAlreadyActive(active.id.clone()));
        }
        *slot = Some(order);
        Ok(())
    }

    /// Whether the given order currently owns the slot.
    pub fn is_active(&self, order_id: &str) -> bool {
        self.inner
            .lock()
            .as_ref()
            .is_some_and(|order| order.id == order_id)
    }

    /// Fold a status observation into the active order.
    pub fn record_status(&self, order_id: &str, snapshot: &OrderStatusSnapshot) {
        let mut slot = self.inner.lock();
        if let Some(order) = slot.as_mut() {
            if order.id == order_id {
                order.status = snapshot.status;
                if snapshot.amount_paid.is_some() {
                    order.amount_paid = snapshot.amount_paid;
                }
                if snapshot.tx_hash.is_some() {
                    order.settlement_tx_hash = snapshot.tx_hash.clone();
                }
            }
        }
    }

    /// Clear the slot, releasing the order id and receive address.
    pub fn clear(&self) {
        *self.inner.lock() = None;
    }

    pub fn current(&self) -> Option<PayoutOrder> {
        self.inner.lock().clone()
    }
}
