//! Rate quoting with stale-response protection.
//!
//! Quote requests fire on every input change, so responses can land out of
//! order. Each request captures a generation number; a response is applied
//! only if no newer request (or input clear) has started since it was
//! issued. Without this, a slow older response could overwrite a newer rate.

use crate::rates::RateSource;
use parking_lot::Mutex;
use ramp_core::{Amount, Quote, TokenSymbol};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of one quote attempt.
///
/// For a valid input the attempt yields a rate or an error, never both,
/// never neither; `Superseded` marks responses discarded by the generation
/// check.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteOutcome {
    /// Input was not a positive amount; prior quote cleared, no request made.
    Cleared,
    /// Rate fetched and stored.
    Quoted(Quote),
    /// Recoverable fetch failure; prior quote cleared.
    Failed(String),
    /// A newer request started while this one was in flight; discarded.
    Superseded,
}

/// Quoter tracking the latest valid rate for the current input.
pub struct RateQuoter {
    source: Arc<dyn RateSource>,
    currency: String,
    generation: AtomicU64,
    latest: Mutex<Option<Quote>>,
}

impl RateQuoter {
    pub fn new(source: Arc<dyn RateSource>, currency: impl Into<String>) -> Self {
        Self {
            source,
            currency: currency.into(),
            generation: AtomicU64::new(0),
            latest: Mutex::new(None),
        }
    }

    /// The most recent successfully-fetched quote, if any.
    pub fn latest(&self) -> Option<Quote> {
        self.latest.lock().clone()
    }

    /// Quote a raw amount string for a token.
    ///
    /// Unparseable or non-positive amounts clear the stored quote and issue
    /// no request.
    pub async fn quote(&self, token: &TokenSymbol, raw_amount: &str) -> QuoteOutcome {
        let Some(amount) = Amount::parse_positive(raw_amount) else {
            // Invalidate any in-flight request along with the stored quote.
            self.generation.fetch_add(1, Ordering::SeqCst);
            *self.latest.lock() = None;
            return QuoteOutcome::Cleared;
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self
            .source
            .fetch_rate(token, amount, &self.currency)
            .await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(%token, %amount, "Discarding stale rate response");
            return QuoteOutcome::Superseded;
        }

        match result {
            Ok(rate) => {
                let quote = Quote::new(token.clone(), amount, rate);
                *self.latest.lock() = Some(quote.clone());
                QuoteOutcome::Quoted(quote)
            }
            Err(err) => {
                warn!(%token, %amount, error = %err, "Rate fetch failed");
                *self.latest.lock() = None;
                QuoteOutcome::Failed(err.to_string())
            }
        }
    }
}

impl std::fmt::Debug for RateQuoter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateQuoter")
            .field("currency", &self.currency)
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish()
    }
}
