//! Beneficiary name resolution with once-per-pair caching.

use crate::institutions::AccountVerifier;
use parking_lot::Mutex;
use ramp_core::Beneficiary;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Resolves account holder names, attempting each unique
/// (identifier, institution) pair at most once.
///
/// Failed attempts are remembered too: a pair is not retried until one of
/// its fields changes. Verification failure is non-fatal here; the caller
/// decides whether an unresolved name blocks submission.
pub struct BeneficiaryResolver {
    verifier: Arc<dyn AccountVerifier>,
    attempts: Mutex<HashMap<(String, String), Option<String>>>,
}

impl BeneficiaryResolver {
    pub fn new(verifier: Arc<dyn AccountVerifier>) -> Self {
        Self {
            verifier,
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve the account holder name for a beneficiary.
    ///
    /// Issues no request when the identifier is shorter than the minimum or
    /// non-numeric, or when this (identifier, institution) pair was already
    /// attempted. On success the name is written back into the beneficiary.
    pub async fn resolve(&self, beneficiary: &mut Beneficiary) -> Option<String> {
        if !beneficiary.has_valid_identifier() || beneficiary.institution_code.is_empty() {
            return None;
        }
        if let Some(name) = &beneficiary.resolved_name {
            return Some(name.clone());
        }

        let key = (
            beneficiary.account_identifier.clone(),
            beneficiary.institution_code.clone(),
        );
        if let Some(cached) = self.attempts.lock().get(&key) {
            beneficiary.resolved_name = cached.clone();
            return cached.clone();
        }

        let result = self
            .verifier
            .verify_account(&key.1, &key.0)
            .await;

        let resolved = match result {
            Ok(name) => Some(name),
            Err(err) => {
                warn!(
                    institution = %key.1,
                    error = %err,
                    "Could not resolve account name"
                );
                None
            }
        };

        self.attempts.lock().insert(key, resolved.clone());
        beneficiary.resolved_name = resolved.clone();
        resolved
    }
}
