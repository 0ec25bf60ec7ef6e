//! Recording daily installments.

use rust_decimal::Decimal;

use gullak_core::{AgentId, Amount, CollectionDay, CustomerId};

use crate::error::LedgerError;
use crate::models::payment::Payment;
use crate::repo::PaymentRepository;
use crate::store::LedgerStore;

/// Records at most one payment per customer per calendar day, with
/// create-or-update semantics.
pub struct PaymentLedger<'a> {
    store: &'a dyn LedgerStore,
}

impl<'a> PaymentLedger<'a> {
    /// Create a new payment ledger.
    #[must_use]
    pub const fn new(store: &'a dyn LedgerStore) -> Self {
        Self { store }
    }

    /// Record an amount for a customer on a calendar day.
    ///
    /// The first write of the day creates the payment at the day's
    /// canonical time-of-day; later writes replace the amount in place,
    /// last write wins, no history kept. The returned [`Payment`] carries
    /// the document id so callers can cache it for same-day edits.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidAmount`] for a negative amount, with
    /// no store traffic. Store failures propagate as
    /// [`LedgerError::Store`]; a failed update leaves the prior record.
    pub async fn record_payment(
        &self,
        customer_id: &CustomerId,
        day: CollectionDay,
        amount: Decimal,
        agent_id: &AgentId,
    ) -> Result<Payment, LedgerError> {
        let amount = Amount::new(amount)?;

        let payment = PaymentRepository::new(self.store)
            .upsert_day_amount(customer_id, day, amount, agent_id)
            .await?;
        tracing::info!(
            customer = %customer_id,
            %day,
            amount = %payment.amount_paid,
            "payment recorded"
        );
        Ok(payment)
    }
}
