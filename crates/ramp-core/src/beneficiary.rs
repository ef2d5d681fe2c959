//! Bank payout beneficiary.

use serde::{Deserialize, Serialize};

/// Minimum account identifier length before verification is attempted.
/// NUBAN account numbers are exactly 10 digits.
pub const MIN_ACCOUNT_DIGITS: usize = 10;

/// A bank payout destination.
///
/// `resolved_name` is filled asynchronously by account verification once
/// both fields are present and valid, and cleared whenever either field
/// changes. Order submission is blocked until a name has been resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beneficiary {
    /// Bank account number (digits only).
    pub account_identifier: String,
    /// Institution code from the bank directory.
    pub institution_code: String,
    /// Account holder name returned by verification.
    pub resolved_name: Option<String>,
}

impl Beneficiary {
    pub fn new(account_identifier: impl Into<String>, institution_code: impl Into<String>) -> Self {
        Self {
            account_identifier: account_identifier.into(),
            institution_code: institution_code.into(),
            resolved_name: None,
        }
    }

    /// Whether the account identifier is long enough and numeric.
    ///
    /// Identifiers failing this check never trigger a verification request.
    pub fn has_valid_identifier(&self) -> bool {
        self.account_identifier.len() >= MIN_ACCOUNT_DIGITS
            && self.account_identifier.chars().all(|c| c.is_ascii_digit())
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_name.is_some()
    }

    /// Replace the account identifier, invalidating any resolved name.
    pub fn set_account_identifier(&mut self, identifier: impl Into<String>) {
        let identifier = identifier.into();
        if identifier != self.account_identifier {
            self.account_identifier = identifier;
            self.resolved_name = None;
        }
    }

    /// Replace the institution code, invalidating any resolved name.
    pub fn set_institution_code(&mut self, code: impl Into<String>) {
        let code = code.into();
        if code != self.institution_code {
            self.institution_code = code;
            self.resolved_name = None;
        }
    }
}
