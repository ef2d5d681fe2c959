//! Precision-safe token amounts.
//!
//! Uses `rust_decimal` for exact decimal arithmetic. Raw-unit conversion
//! (amount × 10^decimals) is the correctness-critical step of the transfer
//! path: a wrong decimal count misrepresents the amount by a power of ten.

use crate::error::{CoreError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

/// Token amount in human units (e.g. `50` USDC, not `50_000_000`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(pub Decimal);

impl Amount {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Parse a user-supplied amount string, requiring a strictly positive
    /// value.
    ///
    /// Returns `None` for unparseable or non-positive input. Callers use
    /// `None` to mean "clear any prior quote, issue no request".
    pub fn parse_positive(input: &str) -> Option<Self> {
        let value: Decimal = input.trim().parse().ok()?;
        let amount = Self(value);
        amount.is_positive().then_some(amount)
    }

    /// Convert to raw on-chain units: `floor(amount × 10^decimals)`.
    ///
    /// Exact up to the flooring at the smallest unit, per the transfer
    /// contract. Fails on negative amounts or overflow of the raw integer.
    pub fn raw_units(&self, decimals: u8) -> Result<u128> {
        if self.0.is_sign_negative() {
            return Err(CoreError::InvalidAmount(self.0.to_string()));
        }
        let mut factor = Decimal::ONE;
        for _ in 0..decimals {
            factor = factor.checked_mul(Decimal::TEN).ok_or_else(|| {
                CoreError::AmountOverflow {
                    amount: self.0.to_string(),
                    decimals,
                }
            })?;
        }
        let scaled = self
            .0
            .checked_mul(factor)
            .ok_or_else(|| CoreError::AmountOverflow {
                amount: self.0.to_string(),
                decimals,
            })?
            .floor();
        scaled.to_u128().ok_or_else(|| CoreError::AmountOverflow {
            amount: self.0.to_string(),
            decimals,
        })
    }

    /// Fiat value at the given rate (fiat units per 1 token).
    #[inline]
    pub fn fiat_value(&self, rate: Decimal) -> Decimal {
        self.0 * rate
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Decimal> for Amount {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul<Decimal> for Amount {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_raw_units_six_decimals() {
        let amount = Amount::new(dec!(50));
        assert_eq!(amount.raw_units(6).unwrap(), 50_000_000);
    }

    #[test]
    fn test_raw_units_eighteen_decimals() {
        let amount = Amount::new(dec!(1.5));
        assert_eq!(amount.raw_units(18).unwrap(), 1_500_000_000_000_000_000);
    }

    #[test]
    fn test_raw_units_floors_sub_unit_remainder() {
        // 0.1234567 USDC has a sub-micro remainder that must be floored.
        let amount = Amount::new(dec!(0.1234567));
        assert_eq!(amount.raw_units(6).unwrap(), 123_456);
    }

    #[test]
    fn test_raw_units_rejects_negative() {
        let amount = Amount::new(dec!(-1));
        assert!(amount.raw_units(6).is_err());
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(
            Amount::parse_positive("50").unwrap().inner(),
            dec!(50)
        );
        assert_eq!(
            Amount::parse_positive(" 0.25 ").unwrap().inner(),
            dec!(0.25)
        );
        assert!(Amount::parse_positive("0").is_none());
        assert!(Amount::parse_positive("-3").is_none());
        assert!(Amount::parse_positive("abc").is_none());
        assert!(Amount::parse_positive("").is_none());
    }

    #[test]
    fn test_fiat_value() {
        let amount = Amount::new(dec!(50));
        assert_eq!(amount.fiat_value(dec!(1500.25)), dec!(75012.50));
    }
}
