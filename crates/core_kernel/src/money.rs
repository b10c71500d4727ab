//! Monetary amounts in integer minor units
//!
//! The ledger never touches floating point: amounts are whole numbers of
//! the smallest currency unit, and currency codes are carried as opaque
//! strings. No conversion or currency-table validation happens here.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur constructing an amount
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount must be greater than zero, got {0}")]
    NonPositive(i64),
}

/// Opaque currency code (e.g. "INR", "USD")
///
/// Stored verbatim apart from whitespace trimming. The ledger treats the
/// code as an identity, never as something to convert between.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// A strictly positive monetary amount in minor units
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount {
    minor_units: i64,
    currency: CurrencyCode,
}

impl Amount {
    /// Creates a new amount; fails unless `minor_units` is strictly positive
    pub fn new(minor_units: i64, currency: CurrencyCode) -> Result<Self, AmountError> {
        if minor_units <= 0 {
            return Err(AmountError::NonPositive(minor_units));
        }
        Ok(Self {
            minor_units,
            currency,
        })
    }

    pub fn minor_units(&self) -> i64 {
        self.minor_units
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.minor_units, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_creation() {
        let amount = Amount::new(1000, CurrencyCode::from("INR")).unwrap();
        assert_eq!(amount.minor_units(), 1000);
        assert_eq!(amount.currency().as_str(), "INR");
    }

    #[test]
    fn test_amount_rejects_zero() {
        let result = Amount::new(0, CurrencyCode::from("INR"));
        assert_eq!(result, Err(AmountError::NonPositive(0)));
    }

    #[test]
    fn test_amount_rejects_negative() {
        let result = Amount::new(-500, CurrencyCode::from("USD"));
        assert_eq!(result, Err(AmountError::NonPositive(-500)));
    }

    #[test]
    fn test_currency_code_is_opaque() {
        // Unknown codes pass through untouched; the ledger never validates
        // against a currency table.
        let code = CurrencyCode::new(" XTEST ");
        assert_eq!(code.as_str(), "XTEST");
    }

    #[test]
    fn test_amount_display() {
        let amount = Amount::new(2500, CurrencyCode::from("USD")).unwrap();
        assert_eq!(amount.to_string(), "2500 USD");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn positive_amounts_always_construct(units in 1i64..=i64::MAX) {
            let amount = Amount::new(units, CurrencyCode::from("INR"));
            prop_assert!(amount.is_ok());
            prop_assert_eq!(amount.unwrap().minor_units(), units);
        }

        #[test]
        fn non_positive_amounts_never_construct(units in i64::MIN..=0i64) {
            prop_assert_eq!(
                Amount::new(units, CurrencyCode::from("INR")),
                Err(AmountError::NonPositive(units))
            );
        }
    }
}
