//! Fixed-window reporting for the agent dashboard.

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use gullak_core::{CollectionDay, PaymentId};

use crate::error::LedgerError;
use crate::models::customer::Customer;
use crate::models::payment::Payment;
use crate::repo::{CustomerRepository, PaymentRepository};
use crate::store::LedgerStore;

/// How many payments the recent-activity feed shows.
pub const RECENT_FEED_LIMIT: usize = 10;

/// One entry of the recent-payments feed, joined with the customer's name
/// for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentPayment {
    pub payment_id: PaymentId,
    /// `"N/A"` when the referenced customer is unknown.
    pub customer_name: String,
    pub amount_paid: Decimal,
    pub date: DateTime<Utc>,
}

/// Dashboard metrics: fixed windows computed from "now".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub total_customers: usize,
    pub collected_today: Decimal,
    pub collected_last_30_days: Decimal,
    pub recent_payments: Vec<RecentPayment>,
}

/// Computes the dashboard snapshot from the Ledger Store.
pub struct DashboardService<'a> {
    store: &'a dyn LedgerStore,
}

impl<'a> DashboardService<'a> {
    /// Create a new dashboard service.
    #[must_use]
    pub const fn new(store: &'a dyn LedgerStore) -> Self {
        Self { store }
    }

    /// The dashboard snapshot as of `now`.
    ///
    /// Three independent evaluations of the same range-sum primitive:
    /// today's window `[start_of_today, end_of_today]`, the trailing
    /// window `[now - 30 days, now]`, and the most recent
    /// [`RECENT_FEED_LIMIT`] payments newest-first with a customer-name
    /// join. No state is shared across the windows.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Store` if a read fails, or
    /// `LedgerError::DataCorruption` if a document does not map.
    pub async fn snapshot(&self, now: DateTime<Utc>) -> Result<DashboardSnapshot, LedgerError> {
        let customers = CustomerRepository::new(self.store);
        let payments = PaymentRepository::new(self.store);

        let roster = customers.list_all().await?;

        let today = CollectionDay::from_datetime(now);
        let collected_today = sum_amounts(
            &payments
                .in_range(today.start_of_day(), today.end_of_day())
                .await?,
        );

        let collected_last_30_days =
            sum_amounts(&payments.in_range(now - TimeDelta::days(30), now).await?);

        let recent_payments = payments
            .recent(RECENT_FEED_LIMIT)
            .await?
            .into_iter()
            .map(|payment| join_customer_name(payment, &roster))
            .collect();

        Ok(DashboardSnapshot {
            total_customers: roster.len(),
            collected_today,
            collected_last_30_days,
            recent_payments,
        })
    }
}

fn sum_amounts(payments: &[Payment]) -> Decimal {
    payments.iter().map(|p| p.amount_paid).sum()
}

fn join_customer_name(payment: Payment, roster: &[Customer]) -> RecentPayment {
    let customer_name = roster
        .iter()
        .find(|c| c.id == payment.customer_id)
        .map_or_else(|| "N/A".to_owned(), Customer::full_name);
    RecentPayment {
        payment_id: payment.id,
        customer_name,
        amount_paid: payment.amount_paid,
        date: payment.date,
    }
}
