//! Customer repository for Ledger Store operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use gullak_core::{AccountType, AgentId, CustomerId};

use crate::error::LedgerError;
use crate::models::customer::{Customer, CustomerUpdate, NewCustomer};
use crate::store::{Document, LedgerStore, StoreError, USERS};

// =============================================================================
// Wire Row Type
// =============================================================================

/// Wire form of a customer document in the `users` collection.
///
/// Every field is defaulted so half-created historic documents still read;
/// enrollment filtering decides what the schedule actually shows.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomerRow {
    #[serde(default)]
    account_number: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    nominee_name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    mobile_number: i64,
    #[serde(default)]
    denomination: i64,
    #[serde(default)]
    account_type: AccountType,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    account_opening_date: Option<DateTime<Utc>>,
    #[serde(default)]
    agent_id: AgentId,
    #[serde(default, rename = "totalDepositedAmountSoFar")]
    total_deposited: Decimal,
    #[serde(default, rename = "monthPaidUpTo")]
    month_paid_up_to: i64,
    #[serde(
        default,
        rename = "dateOfLastDeposit",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    last_deposit_date: Option<DateTime<Utc>>,
}

impl CustomerRow {
    fn from_new(new: &NewCustomer, agent_id: &AgentId) -> Self {
        Self {
            account_number: new.account_number.clone(),
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            nominee_name: new.nominee_name.clone(),
            address: new.address.clone(),
            mobile_number: new.mobile_number,
            denomination: new.denomination,
            account_type: new.account_type,
            account_opening_date: Some(new.account_opening_date.start_of_day()),
            agent_id: agent_id.clone(),
            total_deposited: Decimal::ZERO,
            month_paid_up_to: 0,
            last_deposit_date: None,
        }
    }

    fn into_customer(self, id: CustomerId) -> Customer {
        Customer {
            id,
            account_number: self.account_number,
            first_name: self.first_name,
            last_name: self.last_name,
            nominee_name: self.nominee_name,
            address: self.address,
            mobile_number: self.mobile_number,
            denomination: self.denomination,
            account_type: self.account_type,
            account_opening_date: self.account_opening_date,
            agent_id: self.agent_id,
            total_deposited: self.total_deposited,
            month_paid_up_to: self.month_paid_up_to,
            last_deposit_date: self.last_deposit_date,
        }
    }
}

fn map_document(doc: Document) -> Result<Customer, LedgerError> {
    let row: CustomerRow = serde_json::from_value(doc.fields).map_err(|e| {
        LedgerError::DataCorruption(format!("invalid customer document {}: {e}", doc.id))
    })?;
    Ok(row.into_customer(CustomerId::new(doc.id)))
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for customer documents.
pub struct CustomerRepository<'a> {
    store: &'a dyn LedgerStore,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(store: &'a dyn LedgerStore) -> Self {
        Self { store }
    }

    /// List every customer document, in store order.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Store` if the scan fails, or
    /// `LedgerError::DataCorruption` if a document does not map.
    pub async fn list_all(&self) -> Result<Vec<Customer>, LedgerError> {
        let docs = self.store.list_all(USERS).await?;
        docs.into_iter().map(map_document).collect()
    }

    /// List customers complete enough to appear on the daily schedule.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_all`].
    pub async fn list_enrolled(&self) -> Result<Vec<Customer>, LedgerError> {
        let customers = self.list_all().await?;
        Ok(customers.into_iter().filter(Customer::is_enrolled).collect())
    }

    /// Fetch one customer by id.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Store` if the read fails, or
    /// `LedgerError::DataCorruption` if the document does not map.
    pub async fn get(&self, id: &CustomerId) -> Result<Option<Customer>, LedgerError> {
        let doc = self.store.get(USERS, id.as_str()).await?;
        doc.map(map_document).transpose()
    }

    /// Validate and create a customer account.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` before any store traffic if the
    /// record is malformed, or `LedgerError::Store` if the write fails.
    pub async fn create(
        &self,
        new: &NewCustomer,
        agent_id: &AgentId,
    ) -> Result<Customer, LedgerError> {
        new.validate()?;

        let row = CustomerRow::from_new(new, agent_id);
        let fields = serde_json::to_value(&row)
            .map_err(|e| LedgerError::DataCorruption(format!("serialize customer: {e}")))?;
        let id = self.store.create(USERS, fields).await?;

        tracing::info!(customer = %id, account = %new.account_number, "customer created");
        Ok(row.into_customer(CustomerId::new(id)))
    }

    /// Apply a partial update to a customer's detail fields. An update
    /// naming no fields is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` before any store traffic if a
    /// supplied field is malformed, `LedgerError::NotFound` if the
    /// customer does not exist, or `LedgerError::Store` on write failure.
    pub async fn update(&self, id: &CustomerId, patch: &CustomerUpdate) -> Result<(), LedgerError> {
        patch.validate()?;

        let fields = patch_fields(patch);
        if fields.is_empty() {
            return Ok(());
        }

        self.store
            .update(USERS, id.as_str(), Value::Object(fields))
            .await
            .map_err(|err| match err {
                StoreError::NotFound { .. } => LedgerError::NotFound(format!("customer {id}")),
                other => LedgerError::Store(other),
            })
    }
}

fn patch_fields(patch: &CustomerUpdate) -> Map<String, Value> {
    let mut fields = Map::new();
    if let Some(v) = &patch.first_name {
        fields.insert("firstName".to_owned(), Value::from(v.clone()));
    }
    if let Some(v) = &patch.last_name {
        fields.insert("lastName".to_owned(), Value::from(v.clone()));
    }
    if let Some(v) = &patch.nominee_name {
        fields.insert("nomineeName".to_owned(), Value::from(v.clone()));
    }
    if let Some(v) = &patch.account_number {
        fields.insert("accountNumber".to_owned(), Value::from(v.clone()));
    }
    if let Some(v) = &patch.address {
        fields.insert("address".to_owned(), Value::from(v.clone()));
    }
    if let Some(v) = patch.mobile_number {
        fields.insert("mobileNumber".to_owned(), Value::from(v));
    }
    if let Some(v) = patch.denomination {
        fields.insert("denomination".to_owned(), Value::from(v));
    }
    if let Some(day) = patch.account_opening_date {
        fields.insert(
            "accountOpeningDate".to_owned(),
            Value::from(day.start_of_day().timestamp_millis()),
        );
    }
    fields
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_row_tolerates_sparse_documents() {
        let doc = Document {
            id: "u1".to_owned(),
            fields: json!({"firstName": "Asha"}),
        };
        let customer = map_document(doc).unwrap();
        assert_eq!(customer.first_name, "Asha");
        assert_eq!(customer.account_number, "");
        assert_eq!(customer.denomination, 0);
        assert!(customer.account_opening_date.is_none());
        assert!(!customer.is_enrolled());
    }

    #[test]
    fn test_row_rejects_wrong_shape() {
        let doc = Document {
            id: "u1".to_owned(),
            fields: json!({"denomination": "three thousand"}),
        };
        assert!(matches!(
            map_document(doc),
            Err(LedgerError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_patch_fields_names_only_supplied_fields() {
        let patch = CustomerUpdate {
            address: Some("22 FC Road, Pune".to_owned()),
            denomination: Some(4000),
            ..CustomerUpdate::default()
        };
        let fields = patch_fields(&patch);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("address"), Some(&json!("22 FC Road, Pune")));
        assert_eq!(fields.get("denomination"), Some(&json!(4000)));
    }
}
