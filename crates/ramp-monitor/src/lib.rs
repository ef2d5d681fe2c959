//! Settlement monitoring for payout orders.
//!
//! Once a transfer is submitted, the aggregator settles the fiat leg
//! asynchronously. The monitor polls order status until a terminal state,
//! checking a liveness slot every iteration so an external clear (e.g. a
//! disconnect) stops it, and capping attempts so a backend that never
//! reaches a terminal state cannot leak the loop.

pub mod active;
pub mod error;
pub mod notifier;
pub mod settlement;

pub use active::ActiveOrderSlot;
pub use error::{MonitorError, MonitorResult};
pub use notifier::{LogNotifier, MockNotifier, Notification, Notifier};
pub use settlement::{MonitorConfig, SettlementMonitor, SettlementOutcome};
