//! Money types: recorded installment amounts and pledged denominations.
//!
//! All money flows through [`rust_decimal::Decimal`] so range sums stay
//! exact - binary floats drift on repeated addition.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing an [`Amount`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The amount is negative.
    #[error("amount must not be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative money amount.
///
/// Used for recorded installments. Construction validates the sign; a
/// `Decimal` is always finite, so no further numeric checks are needed.
///
/// ## Examples
///
/// ```
/// use gullak_core::Amount;
/// use rust_decimal::Decimal;
///
/// assert!(Amount::new(Decimal::new(500, 0)).is_ok());
/// assert!(Amount::new(Decimal::new(-10, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Construct an `Amount` from a decimal value.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::Negative`] if the value is below zero.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value < Decimal::ZERO {
            return Err(AmountError::Negative(value));
        }
        Ok(Self(value))
    }

    /// The zero amount.
    #[must_use]
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying decimal value.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur when constructing a [`Denomination`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DenominationError {
    /// The denomination is zero or negative.
    #[error("denomination must be positive (got {0})")]
    NotPositive(i64),
    /// The denomination is not a multiple of the pledge step.
    #[error("denomination must be a multiple of {step} (got {value})")]
    NotMultipleOfStep {
        /// The required step.
        step: i64,
        /// The rejected value.
        value: i64,
    },
}

/// A customer's pledged periodic deposit amount.
///
/// Denominations are whole rupees pledged in steps of 1000. This type is
/// the creation-time validator; stored documents keep the raw integer so
/// that historic malformed records (e.g. a zero denomination) can still be
/// read and aggregated.
///
/// ## Examples
///
/// ```
/// use gullak_core::Denomination;
///
/// assert!(Denomination::new(3000).is_ok());
/// assert!(Denomination::new(2500).is_err()); // not a multiple of 1000
/// assert!(Denomination::new(0).is_err());    // not positive
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Denomination(i64);

impl Denomination {
    /// Pledges are taken in steps of this many rupees.
    pub const STEP: i64 = 1000;

    /// Construct a `Denomination` from a raw value.
    ///
    /// # Errors
    ///
    /// Returns [`DenominationError::NotPositive`] for zero or negative
    /// values, and [`DenominationError::NotMultipleOfStep`] when the value
    /// is not a multiple of [`Self::STEP`].
    pub const fn new(value: i64) -> Result<Self, DenominationError> {
        if value <= 0 {
            return Err(DenominationError::NotPositive(value));
        }
        if value % Self::STEP != 0 {
            return Err(DenominationError::NotMultipleOfStep {
                step: Self::STEP,
                value,
            });
        }
        Ok(Self(value))
    }

    /// Get the underlying value in whole rupees.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }

    /// The denomination as an exact decimal, for arithmetic against sums.
    #[must_use]
    pub fn as_decimal(self) -> Decimal {
        Decimal::from(self.0)
    }
}

impl TryFrom<i64> for Denomination {
    type Error = DenominationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Denomination> for i64 {
    fn from(denomination: Denomination) -> Self {
        denomination.0
    }
}

impl core::fmt::Display for Denomination {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_rejects_negative() {
        let err = Amount::new(Decimal::new(-10, 0)).unwrap_err();
        assert_eq!(err, AmountError::Negative(Decimal::new(-10, 0)));
    }

    #[test]
    fn test_amount_accepts_zero() {
        assert_eq!(Amount::new(Decimal::ZERO).unwrap(), Amount::zero());
    }

    #[test]
    fn test_amount_serde_rejects_negative() {
        let result: Result<Amount, _> = serde_json::from_str("-5");
        assert!(result.is_err());

        let amount: Amount = serde_json::from_str("500").unwrap();
        assert_eq!(amount.value(), Decimal::new(500, 0));
    }

    #[test]
    fn test_denomination_step_validation() {
        assert_eq!(Denomination::new(3000).unwrap().as_i64(), 3000);
        assert!(matches!(
            Denomination::new(2500),
            Err(DenominationError::NotMultipleOfStep { step: 1000, value: 2500 })
        ));
        assert!(matches!(
            Denomination::new(0),
            Err(DenominationError::NotPositive(0))
        ));
        assert!(matches!(
            Denomination::new(-1000),
            Err(DenominationError::NotPositive(-1000))
        ));
    }

    #[test]
    fn test_denomination_serde_goes_through_validation() {
        let result: Result<Denomination, _> = serde_json::from_str("2500");
        assert!(result.is_err());

        let denomination: Denomination = serde_json::from_str("2000").unwrap();
        assert_eq!(denomination.as_i64(), 2000);
    }
}
