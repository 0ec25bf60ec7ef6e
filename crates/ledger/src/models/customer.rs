//! Recurring-deposit customers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gullak_core::{
    AccountType, AgentId, CollectionDay, CustomerId, Denomination, DenominationError,
};

/// Errors raised by customer field validation, before any store write.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty or missing.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The pledged denomination is invalid.
    #[error(transparent)]
    Denomination(#[from] DenominationError),
}

/// A recurring-deposit customer.
///
/// Customers are never hard-deleted; the cumulative bookkeeping fields
/// (`total_deposited`, `month_paid_up_to`, `last_deposit_date`) are carried
/// in the stored document but not maintained incrementally - summaries
/// recompute from payments at read time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Opaque document id.
    pub id: CustomerId,
    /// Account number; unique in practice, not enforced by the store.
    pub account_number: String,
    pub first_name: String,
    pub last_name: String,
    pub nominee_name: String,
    pub address: String,
    pub mobile_number: i64,
    /// Pledged periodic deposit in whole rupees. Raw on read so historic
    /// malformed records (e.g. zero) still aggregate; validated on write.
    pub denomination: i64,
    pub account_type: AccountType,
    pub account_opening_date: Option<DateTime<Utc>>,
    /// The agent who opened the account.
    pub agent_id: AgentId,
    pub total_deposited: Decimal,
    pub month_paid_up_to: i64,
    pub last_deposit_date: Option<DateTime<Utc>>,
}

impl Customer {
    /// Whether this record is complete enough to appear on the daily
    /// schedule. Half-created documents without an account number or a
    /// first name are skipped, not surfaced as errors.
    #[must_use]
    pub fn is_enrolled(&self) -> bool {
        !self.account_number.is_empty() && !self.first_name.is_empty()
    }

    /// Display name, tolerating a missing last name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    /// Case-insensitive search over first name, last name, and account
    /// number. An empty query matches everything.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.first_name.to_lowercase().contains(&query)
            || self.last_name.to_lowercase().contains(&query)
            || self.account_number.to_lowercase().contains(&query)
    }
}

/// Fields supplied when opening a customer account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub nominee_name: String,
    pub account_number: String,
    pub address: String,
    pub mobile_number: i64,
    pub denomination: i64,
    #[serde(default)]
    pub account_type: AccountType,
    pub account_opening_date: CollectionDay,
}

impl NewCustomer {
    /// Validate the record before it is written.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for an empty required
    /// text field, or [`ValidationError::Denomination`] when the pledge is
    /// not a positive multiple of 1000.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("nomineeName", &self.nominee_name),
            ("accountNumber", &self.account_number),
            ("address", &self.address),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(field));
            }
        }
        Denomination::new(self.denomination)?;
        Ok(())
    }
}

/// Partial update of a customer's detail fields.
///
/// Absent fields keep their stored values; identity and bookkeeping
/// fields cannot be touched through an update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nominee_name: Option<String>,
    pub account_number: Option<String>,
    pub address: Option<String>,
    pub mobile_number: Option<i64>,
    pub denomination: Option<i64>,
    pub account_opening_date: Option<CollectionDay>,
}

impl CustomerUpdate {
    /// Validate the supplied fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Denomination`] for an invalid pledge,
    /// or [`ValidationError::MissingField`] when the update would blank a
    /// field the schedule depends on.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(denomination) = self.denomination {
            Denomination::new(denomination)?;
        }
        let guarded = [
            ("firstName", &self.first_name),
            ("accountNumber", &self.account_number),
        ];
        for (field, value) in guarded {
            if value.as_ref().is_some_and(|v| v.trim().is_empty()) {
                return Err(ValidationError::MissingField(field));
            }
        }
        Ok(())
    }

    /// Whether the update names any field at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.nominee_name.is_none()
            && self.account_number.is_none()
            && self.address.is_none()
            && self.mobile_number.is_none()
            && self.denomination.is_none()
            && self.account_opening_date.is_none()
    }
}
