//! Payment repository for Ledger Store operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use gullak_core::{AgentId, Amount, CollectionDay, CustomerId, PaymentId};

use crate::error::LedgerError;
use crate::models::payment::Payment;
use crate::store::{DAILY_PAYMENTS, Document, LedgerStore};

/// Wire form of a payment document in the `dailyPayments` collection.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentRow {
    customer_id: CustomerId,
    amount_paid: Decimal,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    date: DateTime<Utc>,
    #[serde(default)]
    agent_id: AgentId,
}

fn map_document(doc: Document) -> Result<Payment, LedgerError> {
    let row: PaymentRow = serde_json::from_value(doc.fields).map_err(|e| {
        LedgerError::DataCorruption(format!("invalid payment document {}: {e}", doc.id))
    })?;
    Ok(Payment {
        id: PaymentId::new(doc.id),
        customer_id: row.customer_id,
        amount_paid: row.amount_paid,
        date: row.date,
        agent_id: row.agent_id,
    })
}

fn millis(at: DateTime<Utc>) -> Value {
    Value::from(at.timestamp_millis())
}

/// Repository for payment documents.
pub struct PaymentRepository<'a> {
    store: &'a dyn LedgerStore,
}

impl<'a> PaymentRepository<'a> {
    /// Create a new payment repository.
    #[must_use]
    pub const fn new(store: &'a dyn LedgerStore) -> Self {
        Self { store }
    }

    /// Payments whose timestamp lies within `[start, end]` inclusive.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Store` if the query fails, or
    /// `LedgerError::DataCorruption` if a document does not map.
    pub async fn in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Payment>, LedgerError> {
        let docs = self
            .store
            .query_range(DAILY_PAYMENTS, "date", &millis(start), &millis(end))
            .await?;
        docs.into_iter().map(map_document).collect()
    }

    /// All payments recorded on one calendar day.
    ///
    /// # Errors
    ///
    /// Same as [`Self::in_range`].
    pub async fn for_day(&self, day: CollectionDay) -> Result<Vec<Payment>, LedgerError> {
        self.in_range(day.start_of_day(), day.end_of_day()).await
    }

    /// A customer's full payment history, in store order.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Store` if the query fails, or
    /// `LedgerError::DataCorruption` if a document does not map.
    pub async fn for_customer(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<Payment>, LedgerError> {
        let docs = self
            .store
            .query_equals(
                DAILY_PAYMENTS,
                "customerId",
                &Value::from(customer_id.as_str()),
            )
            .await?;
        docs.into_iter().map(map_document).collect()
    }

    /// The most recent `limit` payments, newest first.
    ///
    /// The store contract has no order-by/limit primitive, so this sorts a
    /// full scan client-side - acceptable at the same scale that keeps
    /// aggregation derived-at-read.
    ///
    /// # Errors
    ///
    /// Same as [`Self::for_customer`].
    pub async fn recent(&self, limit: usize) -> Result<Vec<Payment>, LedgerError> {
        let docs = self.store.list_all(DAILY_PAYMENTS).await?;
        let mut payments: Vec<Payment> = docs
            .into_iter()
            .map(map_document)
            .collect::<Result<_, _>>()?;
        payments.sort_by(|a, b| b.date.cmp(&a.date));
        payments.truncate(limit);
        Ok(payments)
    }

    /// The payment already recorded for a (customer, day) pair, if any.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Store` if the read fails, or
    /// `LedgerError::DataCorruption` if the document does not map.
    pub async fn get_for_day(
        &self,
        customer_id: &CustomerId,
        day: CollectionDay,
    ) -> Result<Option<Payment>, LedgerError> {
        let key = Payment::day_key(customer_id, day);
        let doc = self.store.get(DAILY_PAYMENTS, key.as_str()).await?;
        doc.map(map_document).transpose()
    }

    /// Create-or-update the payment for a (customer, day) pair.
    ///
    /// The document id is the deterministic day key, so an existing record
    /// gets an amount-only merge (id, date, customer, and creating agent
    /// preserved) and an absent one is written wholesale with the date at
    /// the day's canonical time-of-day. Exactly one write either way.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Store` if a read or write fails, or
    /// `LedgerError::DataCorruption` if the existing document does not map.
    pub async fn upsert_day_amount(
        &self,
        customer_id: &CustomerId,
        day: CollectionDay,
        amount: Amount,
        agent_id: &AgentId,
    ) -> Result<Payment, LedgerError> {
        let key = Payment::day_key(customer_id, day);

        match self.store.get(DAILY_PAYMENTS, key.as_str()).await? {
            Some(doc) => {
                let mut payment = map_document(doc)?;
                let mut fields = Map::new();
                fields.insert(
                    "amountPaid".to_owned(),
                    serde_json::to_value(amount.value()).map_err(|e| {
                        LedgerError::DataCorruption(format!("serialize amount: {e}"))
                    })?,
                );
                self.store
                    .update(DAILY_PAYMENTS, key.as_str(), Value::Object(fields))
                    .await?;
                payment.amount_paid = amount.value();
                Ok(payment)
            }
            None => {
                let row = PaymentRow {
                    customer_id: customer_id.clone(),
                    amount_paid: amount.value(),
                    date: day.deposit_time(),
                    agent_id: agent_id.clone(),
                };
                let fields = serde_json::to_value(&row)
                    .map_err(|e| LedgerError::DataCorruption(format!("serialize payment: {e}")))?;
                self.store.put(DAILY_PAYMENTS, key.as_str(), fields).await?;
                Ok(Payment {
                    id: key,
                    customer_id: row.customer_id,
                    amount_paid: row.amount_paid,
                    date: row.date,
                    agent_id: row.agent_id,
                })
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_map_document_reads_wire_form() {
        let day: CollectionDay = "2026-08-05".parse().unwrap();
        let doc = Document {
            id: "c1_2026-08-05".to_owned(),
            fields: json!({
                "customerId": "c1",
                "amountPaid": "500",
                "date": day.deposit_time().timestamp_millis(),
                "agentId": "agent-1",
            }),
        };

        let payment = map_document(doc).unwrap();
        assert_eq!(payment.customer_id, CustomerId::from("c1"));
        assert_eq!(payment.amount_paid, Decimal::new(500, 0));
        assert_eq!(payment.day(), day);
    }

    #[test]
    fn test_map_document_rejects_missing_date() {
        let doc = Document {
            id: "p1".to_owned(),
            fields: json!({"customerId": "c1", "amountPaid": "500"}),
        };
        assert!(matches!(
            map_document(doc),
            Err(LedgerError::DataCorruption(_))
        ));
    }
}
