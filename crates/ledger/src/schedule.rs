//! Daily visit schedule: order merge and day-row assembly.

use std::collections::HashMap;

use gullak_core::{AgentId, CollectionDay, CustomerId};

use crate::error::LedgerError;
use crate::models::customer::Customer;
use crate::models::payment::Payment;
use crate::models::visit_order::VisitOrder;
use crate::repo::{CustomerRepository, PaymentRepository, VisitOrderRepository};
use crate::store::LedgerStore;

/// Merge an agent's saved visit order with the live customer set.
///
/// Saved ids are visited left to right; each one present in the live set
/// is appended once and consumed, so a duplicated id in the saved order is
/// inert and an id whose customer no longer exists is silently skipped.
/// Customers created since the order was last saved keep their original
/// relative order at the tail. The result is always a permutation of
/// exactly the live set.
///
/// With no saved order the live list passes through untouched, in store
/// order.
#[must_use]
pub fn merge_visit_order(live: Vec<Customer>, saved: Option<&[CustomerId]>) -> Vec<Customer> {
    let Some(saved) = saved else {
        return live;
    };

    let mut remaining: Vec<Option<Customer>> = live.into_iter().map(Some).collect();
    let index: HashMap<CustomerId, usize> = remaining
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| slot.as_ref().map(|c| (c.id.clone(), i)))
        .collect();

    let mut merged = Vec::with_capacity(remaining.len());
    for id in saved {
        if let Some(&i) = index.get(id) {
            if let Some(customer) = remaining.get_mut(i).and_then(Option::take) {
                merged.push(customer);
            }
        }
    }
    merged.extend(remaining.into_iter().flatten());
    merged
}

/// One row of the daily schedule: a customer in visit order, joined with
/// any payment already recorded for the day.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRow {
    pub customer: Customer,
    /// The day's payment, carried so same-day edits can reuse its id
    /// without re-querying.
    pub payment: Option<Payment>,
}

/// Assembles the daily collection schedule for an agent.
pub struct ScheduleService<'a> {
    store: &'a dyn LedgerStore,
}

impl<'a> ScheduleService<'a> {
    /// Create a new schedule service.
    #[must_use]
    pub const fn new(store: &'a dyn LedgerStore) -> Self {
        Self { store }
    }

    /// The merged schedule for one agent and one calendar day: enrolled
    /// customers in the agent's preferred order, each joined with the
    /// day's recorded payment if there is one.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Store` if any read fails, or
    /// `LedgerError::DataCorruption` if a document does not map.
    pub async fn day_schedule(
        &self,
        agent_id: &AgentId,
        day: CollectionDay,
    ) -> Result<Vec<ScheduleRow>, LedgerError> {
        let customers = CustomerRepository::new(self.store).list_enrolled().await?;
        let saved = VisitOrderRepository::new(self.store).load(agent_id).await?;
        let ordered = merge_visit_order(customers, saved.as_ref().map(|o| o.order.as_slice()));

        let payments = PaymentRepository::new(self.store).for_day(day).await?;
        let mut by_customer: HashMap<CustomerId, Payment> = payments
            .into_iter()
            .map(|p| (p.customer_id.clone(), p))
            .collect();

        tracing::debug!(agent = %agent_id, %day, rows = ordered.len(), "assembled day schedule");
        Ok(ordered
            .into_iter()
            .map(|customer| {
                let payment = by_customer.remove(&customer.id);
                ScheduleRow { customer, payment }
            })
            .collect())
    }

    /// Persist an agent's preferred visit order, replacing any previous
    /// one wholesale.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Store` if the write fails.
    pub async fn save_visit_order(
        &self,
        agent_id: &AgentId,
        order: Vec<CustomerId>,
    ) -> Result<(), LedgerError> {
        tracing::info!(agent = %agent_id, entries = order.len(), "saving visit order");
        VisitOrderRepository::new(self.store)
            .save(agent_id, &VisitOrder::new(order))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use gullak_core::AccountType;

    use super::*;

    fn customer(id: &str) -> Customer {
        Customer {
            id: CustomerId::from(id),
            account_number: format!("RD-{id}"),
            first_name: format!("First-{id}"),
            last_name: String::new(),
            nominee_name: String::new(),
            address: String::new(),
            mobile_number: 0,
            denomination: 1000,
            account_type: AccountType::Rd,
            account_opening_date: None,
            agent_id: AgentId::from("agent-1"),
            total_deposited: Decimal::ZERO,
            month_paid_up_to: 0,
            last_deposit_date: None,
        }
    }

    fn ids(customers: &[Customer]) -> Vec<&str> {
        customers.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_no_saved_order_passes_through() {
        let live = vec![customer("a"), customer("b")];
        let merged = merge_visit_order(live, None);
        assert_eq!(ids(&merged), ["a", "b"]);
    }

    #[test]
    fn test_known_first_new_last() {
        let live = vec![customer("a"), customer("b"), customer("c")];
        let saved = [CustomerId::from("b"), CustomerId::from("a")];
        let merged = merge_visit_order(live, Some(&saved));
        assert_eq!(ids(&merged), ["b", "a", "c"]);
    }

    #[test]
    fn test_stale_ids_are_skipped() {
        let live = vec![customer("a"), customer("b")];
        let saved = [
            CustomerId::from("gone"),
            CustomerId::from("b"),
            CustomerId::from("also-gone"),
        ];
        let merged = merge_visit_order(live, Some(&saved));
        assert_eq!(ids(&merged), ["b", "a"]);
    }

    #[test]
    fn test_duplicate_saved_ids_consume_once() {
        let live = vec![customer("a"), customer("b")];
        let saved = [
            CustomerId::from("b"),
            CustomerId::from("b"),
            CustomerId::from("a"),
        ];
        let merged = merge_visit_order(live, Some(&saved));
        assert_eq!(ids(&merged), ["b", "a"]);
    }

    #[test]
    fn test_merge_is_a_permutation_of_live() {
        let live: Vec<Customer> = ["a", "b", "c", "d"].into_iter().map(customer).collect();
        let saved = [
            CustomerId::from("d"),
            CustomerId::from("x"),
            CustomerId::from("b"),
            CustomerId::from("d"),
        ];
        let merged = merge_visit_order(live, Some(&saved));

        let mut sorted = ids(&merged);
        sorted.sort_unstable();
        assert_eq!(sorted, ["a", "b", "c", "d"]);
        assert_eq!(ids(&merged), ["d", "b", "a", "c"]);
    }

    #[test]
    fn test_empty_live_set_yields_empty_schedule() {
        let saved = [CustomerId::from("a")];
        assert!(merge_visit_order(Vec::new(), Some(&saved)).is_empty());
    }
}
