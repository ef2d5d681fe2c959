//! Token symbol identifier.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Uppercase token symbol (e.g. "USDC", "CUSD").
///
/// Symbols are normalized to uppercase on construction so table lookups and
/// API payloads agree regardless of how the user typed them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSymbol(String);

impl TokenSymbol {
    /// Create a symbol, normalizing to uppercase.
    ///
    /// Fails on empty or non-alphanumeric input.
    pub fn new(symbol: &str) -> Result<Self, CoreError> {
        let trimmed = symbol.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidToken(symbol.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TokenSymbol {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case() {
        assert_eq!(TokenSymbol::new("usdc").unwrap().as_str(), "USDC");
        assert_eq!(TokenSymbol::new(" cUsd ").unwrap().as_str(), "CUSD");
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(TokenSymbol::new("").is_err());
        assert!(TokenSymbol::new("US DC").is_err());
        assert!(TokenSymbol::new("usd-c").is_err());
    }
}
