//! Daily installment payments.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use gullak_core::{AgentId, CollectionDay, CustomerId, PaymentId};

/// One day's recorded installment for one customer.
///
/// Identity is the composite (customer, calendar day) key - see
/// [`Payment::day_key`] - so a second write for the same day lands on the
/// same document. Only the amount is mutated after creation; the date,
/// customer, and recording agent are fixed at first write. Payments are
/// never deleted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub customer_id: CustomerId,
    pub amount_paid: Decimal,
    /// Stored at the canonical time-of-day for the collection day.
    pub date: DateTime<Utc>,
    /// The agent who first recorded the payment.
    pub agent_id: AgentId,
}

impl Payment {
    /// The deterministic document id for a (customer, day) pair.
    ///
    /// Deriving identity from the pair makes create-or-update a keyed
    /// upsert: two writers racing on the same cell converge on one
    /// document instead of producing duplicate rows.
    #[must_use]
    pub fn day_key(customer_id: &CustomerId, day: CollectionDay) -> PaymentId {
        PaymentId::new(format!("{}_{day}", customer_id.as_str()))
    }

    /// The calendar day this payment belongs to.
    #[must_use]
    pub fn day(&self) -> CollectionDay {
        CollectionDay::from_datetime(self.date)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_day_key_is_deterministic() {
        let customer = CustomerId::from("c-42");
        let day: CollectionDay = "2026-08-05".parse().unwrap();

        let key = Payment::day_key(&customer, day);
        assert_eq!(key.as_str(), "c-42_2026-08-05");
        assert_eq!(Payment::day_key(&customer, day), key);
    }

    #[test]
    fn test_day_recovers_collection_day() {
        let day: CollectionDay = "2026-08-05".parse().unwrap();
        let payment = Payment {
            id: PaymentId::from("p1"),
            customer_id: CustomerId::from("c1"),
            amount_paid: Decimal::new(500, 0),
            date: day.deposit_time(),
            agent_id: AgentId::from("agent-1"),
        };
        assert_eq!(payment.day(), day);
    }
}
