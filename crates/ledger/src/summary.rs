//! Range aggregation of payments against pledged denominations.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use gullak_core::{CollectionDay, CustomerId};

use crate::error::LedgerError;
use crate::models::customer::Customer;
use crate::models::payment::Payment;
use crate::repo::{CustomerRepository, PaymentRepository};
use crate::store::LedgerStore;

/// Per-customer totals for a date range. Derived on every query, never
/// persisted or cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub customer_id: CustomerId,
    pub account_number: String,
    pub first_name: String,
    pub last_name: String,
    pub denomination: i64,
    pub total_paid: Decimal,
    /// `denomination - total_paid`; negative on over-payment, not clamped.
    pub remaining: Decimal,
}

/// Aggregate payments within `[start, end]` (inclusive on both ends)
/// against every customer's denomination.
///
/// Every customer gets a row, including those with no payments in range.
/// Payments referencing a customer not in `customers` contribute to no
/// row. Sums are exact decimal arithmetic. Row order follows the customer
/// list; callers sort or filter as needed.
#[must_use]
pub fn aggregate_range(
    customers: &[Customer],
    payments: &[Payment],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<SummaryRow> {
    let mut totals: HashMap<&CustomerId, Decimal> = HashMap::new();
    for payment in payments {
        if payment.date >= start && payment.date <= end {
            *totals.entry(&payment.customer_id).or_insert(Decimal::ZERO) += payment.amount_paid;
        }
    }

    customers
        .iter()
        .map(|customer| {
            let total_paid = totals.get(&customer.id).copied().unwrap_or(Decimal::ZERO);
            SummaryRow {
                customer_id: customer.id.clone(),
                account_number: customer.account_number.clone(),
                first_name: customer.first_name.clone(),
                last_name: customer.last_name.clone(),
                denomination: customer.denomination,
                total_paid,
                remaining: Decimal::from(customer.denomination) - total_paid,
            }
        })
        .collect()
}

/// Computes range summaries from the Ledger Store.
pub struct SummaryService<'a> {
    store: &'a dyn LedgerStore,
}

impl<'a> SummaryService<'a> {
    /// Create a new summary service.
    #[must_use]
    pub const fn new(store: &'a dyn LedgerStore) -> Self {
        Self { store }
    }

    /// One summary row per customer for the inclusive day range
    /// `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Store` if a read fails, or
    /// `LedgerError::DataCorruption` if a document does not map.
    pub async fn range_summary(
        &self,
        start: CollectionDay,
        end: CollectionDay,
    ) -> Result<Vec<SummaryRow>, LedgerError> {
        let start = start.start_of_day();
        let end = end.end_of_day();

        let customers = CustomerRepository::new(self.store).list_all().await?;
        let payments = PaymentRepository::new(self.store).in_range(start, end).await?;

        tracing::debug!(
            customers = customers.len(),
            payments = payments.len(),
            "aggregating range summary"
        );
        Ok(aggregate_range(&customers, &payments, start, end))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gullak_core::{AccountType, AgentId, PaymentId};

    use super::*;

    fn customer(id: &str, denomination: i64) -> Customer {
        Customer {
            id: CustomerId::from(id),
            account_number: format!("RD-{id}"),
            first_name: format!("First-{id}"),
            last_name: String::new(),
            nominee_name: String::new(),
            address: String::new(),
            mobile_number: 0,
            denomination,
            account_type: AccountType::Rd,
            account_opening_date: None,
            agent_id: AgentId::from("agent-1"),
            total_deposited: Decimal::ZERO,
            month_paid_up_to: 0,
            last_deposit_date: None,
        }
    }

    fn payment(customer_id: &str, amount: i64, day: &str) -> Payment {
        let day: CollectionDay = day.parse().unwrap();
        Payment {
            id: Payment::day_key(&CustomerId::from(customer_id), day),
            customer_id: CustomerId::from(customer_id),
            amount_paid: Decimal::new(amount, 0),
            date: day.deposit_time(),
            agent_id: AgentId::from("agent-1"),
        }
    }

    fn window(start: &str, end: &str) -> (DateTime<Utc>, DateTime<Utc>) {
        let start: CollectionDay = start.parse().unwrap();
        let end: CollectionDay = end.parse().unwrap();
        (start.start_of_day(), end.end_of_day())
    }

    #[test]
    fn test_totals_and_remaining_per_customer() {
        let customers = [customer("1", 3000), customer("2", 2000)];
        let payments = [
            payment("1", 1000, "2026-08-01"),
            payment("1", 500, "2026-08-02"),
        ];
        let (start, end) = window("2026-08-01", "2026-08-02");

        let rows = aggregate_range(&customers, &payments, start, end);
        assert_eq!(rows.len(), 2);

        let first = rows.first().unwrap();
        assert_eq!(first.total_paid, Decimal::new(1500, 0));
        assert_eq!(first.remaining, Decimal::new(1500, 0));

        let second = rows.get(1).unwrap();
        assert_eq!(second.total_paid, Decimal::ZERO);
        assert_eq!(second.remaining, Decimal::new(2000, 0));
    }

    #[test]
    fn test_range_is_inclusive_and_bounded() {
        let customers = [customer("1", 3000)];
        let day: CollectionDay = "2026-08-02".parse().unwrap();
        let (start, end) = (day.start_of_day(), day.end_of_day());

        let at_start = Payment {
            date: start,
            ..payment("1", 100, "2026-08-02")
        };
        let at_end = Payment {
            date: end,
            ..payment("1", 10, "2026-08-02")
        };
        let before = Payment {
            date: start - chrono::TimeDelta::milliseconds(1),
            ..payment("1", 1000, "2026-08-01")
        };
        let after = Payment {
            date: end + chrono::TimeDelta::milliseconds(1),
            ..payment("1", 1000, "2026-08-03")
        };

        let rows = aggregate_range(&customers, &[at_start, at_end, before, after], start, end);
        assert_eq!(rows.first().unwrap().total_paid, Decimal::new(110, 0));
    }

    #[test]
    fn test_empty_payments_yield_full_remaining() {
        let customers = [customer("1", 3000)];
        let (start, end) = window("2026-08-01", "2026-08-31");

        let rows = aggregate_range(&customers, &[], start, end);
        let row = rows.first().unwrap();
        assert_eq!(row.total_paid, Decimal::ZERO);
        assert_eq!(row.remaining, Decimal::new(3000, 0));
    }

    #[test]
    fn test_zero_denomination_goes_negative() {
        let customers = [customer("1", 0)];
        let payments = [payment("1", 500, "2026-08-01")];
        let (start, end) = window("2026-08-01", "2026-08-01");

        let rows = aggregate_range(&customers, &payments, start, end);
        assert_eq!(rows.first().unwrap().remaining, Decimal::new(-500, 0));
    }

    #[test]
    fn test_over_payment_is_not_clamped() {
        let customers = [customer("1", 1000)];
        let payments = [
            payment("1", 800, "2026-08-01"),
            payment("1", 800, "2026-08-02"),
        ];
        let (start, end) = window("2026-08-01", "2026-08-02");

        let rows = aggregate_range(&customers, &payments, start, end);
        assert_eq!(rows.first().unwrap().remaining, Decimal::new(-600, 0));
    }

    #[test]
    fn test_payments_for_unknown_customers_are_dropped() {
        let customers = [customer("1", 1000)];
        let payments = [payment("ghost", 800, "2026-08-01")];
        let (start, end) = window("2026-08-01", "2026-08-01");

        let rows = aggregate_range(&customers, &payments, start, end);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.first().unwrap().total_paid, Decimal::ZERO);
    }
}
