//! User-facing notifications.
//!
//! The original surface was toast notifications; headless runs map them to
//! log lines. The trait keeps the monitor testable: terminal transitions
//! must notify exactly once.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Sink for flow notifications.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn failure(&self, message: &str);
    fn info(&self, message: &str);
    /// Settlement did not reach a terminal state within the polling cap.
    fn stuck(&self, message: &str);
}

/// Arc wrapper for notifier trait objects.
pub type DynNotifier = Arc<dyn Notifier>;

/// Notifier that writes to the tracing log.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        info!(outcome = "success", "{message}");
    }

    fn failure(&self, message: &str) {
        error!(outcome = "failure", "{message}");
    }

    fn info(&self, message: &str) {
        info!("{message}");
    }

    fn stuck(&self, message: &str) {
        warn!(outcome = "stuck", "{message}");
    }
}

/// A recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Failure(String),
    Info(String),
    Stuck(String),
}

/// Recording notifier for tests.
#[derive(Debug, Default)]
pub struct MockNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }

    pub fn count_successes(&self) -> usize {
        self.notifications
            .lock()
            .iter()
            .filter(|n| matches!(n, Notification::Success(_)))
            .count()
    }

    pub fn count_failures(&self) -> usize {
        self.notifications
            .lock()
            .iter()
            .filter(|n| matches!(n, Notification::Failure(_)))
            .count()
    }

    pub fn count_stuck(&self) -> usize {
        self.notifications
            .lock()
            .iter()
            .filter(|n| matches!(n, Notification::Stuck(_)))
            .count()
    }
}

impl Notifier for MockNotifier {
    fn success(&self, message: &str) {
        self.notifications
            .lock()
            .push(Notification::Success(message.to_string()));
    }

    fn failure(&self, message: &str) {
        self.notifications
            .lock()
            .push(Notification::Failure(message.to_string()));
    }

    fn info(&self, message: &str) {
        self.notifications
            .lock()
            .push(Notification::Info(message.to_string()));
    }

    fn stuck(&self, message: &str) {
        self.notifications
            .lock()
            .push(Notification::Stuck(message.to_string()));
    }
}
