//! End-to-end tests for the daily schedule: order persistence, merge over
//! a changing customer set, and the day-payment join.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use gullak_core::{AgentId, CollectionDay, CustomerId};
use gullak_integration_tests::{seed_customer, seed_payment};
use gullak_ledger::payments::PaymentLedger;
use gullak_ledger::schedule::ScheduleService;
use gullak_ledger::store::MemoryStore;

fn day() -> CollectionDay {
    "2026-08-05".parse().unwrap()
}

fn row_ids(rows: &[gullak_ledger::schedule::ScheduleRow]) -> Vec<&str> {
    rows.iter().map(|r| r.customer.id.as_str()).collect()
}

#[tokio::test]
async fn test_schedule_without_saved_order_uses_store_order() {
    let store = MemoryStore::new();
    seed_customer(&store, "c2", "Meera", "Shah", "RD-2", 2000).await;
    seed_customer(&store, "c1", "Asha", "Kulkarni", "RD-1", 3000).await;

    let rows = ScheduleService::new(&store)
        .day_schedule(&AgentId::from("agent-1"), day())
        .await
        .unwrap();

    assert_eq!(row_ids(&rows), ["c1", "c2"]);
}

#[tokio::test]
async fn test_saved_order_round_trip() {
    let store = MemoryStore::new();
    seed_customer(&store, "c1", "Asha", "Kulkarni", "RD-1", 3000).await;
    seed_customer(&store, "c2", "Meera", "Shah", "RD-2", 2000).await;
    seed_customer(&store, "c3", "Ravi", "Patil", "RD-3", 1000).await;

    let agent = AgentId::from("agent-1");
    let service = ScheduleService::new(&store);

    service
        .save_visit_order(
            &agent,
            vec![CustomerId::from("c3"), CustomerId::from("c1")],
        )
        .await
        .unwrap();

    let rows = service.day_schedule(&agent, day()).await.unwrap();
    // Known ids first in saved order, the unmentioned customer appended.
    assert_eq!(row_ids(&rows), ["c3", "c1", "c2"]);
}

#[tokio::test]
async fn test_saved_order_is_scoped_per_agent() {
    let store = MemoryStore::new();
    seed_customer(&store, "c1", "Asha", "Kulkarni", "RD-1", 3000).await;
    seed_customer(&store, "c2", "Meera", "Shah", "RD-2", 2000).await;

    let service = ScheduleService::new(&store);
    service
        .save_visit_order(
            &AgentId::from("agent-a"),
            vec![CustomerId::from("c2"), CustomerId::from("c1")],
        )
        .await
        .unwrap();

    let reordered = service
        .day_schedule(&AgentId::from("agent-a"), day())
        .await
        .unwrap();
    assert_eq!(row_ids(&reordered), ["c2", "c1"]);

    // Another agent never saved an order and sees store order.
    let untouched = service
        .day_schedule(&AgentId::from("agent-b"), day())
        .await
        .unwrap();
    assert_eq!(row_ids(&untouched), ["c1", "c2"]);
}

#[tokio::test]
async fn test_stale_ids_skip_and_new_customers_append() {
    let store = MemoryStore::new();
    seed_customer(&store, "c1", "Asha", "Kulkarni", "RD-1", 3000).await;
    seed_customer(&store, "c2", "Meera", "Shah", "RD-2", 2000).await;

    let agent = AgentId::from("agent-1");
    let service = ScheduleService::new(&store);
    service
        .save_visit_order(
            &agent,
            vec![
                CustomerId::from("c9"), // no longer exists
                CustomerId::from("c2"),
                CustomerId::from("c1"),
            ],
        )
        .await
        .unwrap();

    // A customer created after the order was saved.
    seed_customer(&store, "c3", "Ravi", "Patil", "RD-3", 1000).await;

    let rows = service.day_schedule(&agent, day()).await.unwrap();
    assert_eq!(row_ids(&rows), ["c2", "c1", "c3"]);
}

#[tokio::test]
async fn test_incomplete_customers_are_not_scheduled() {
    let store = MemoryStore::new();
    seed_customer(&store, "c1", "Asha", "Kulkarni", "RD-1", 3000).await;
    // Half-created document: no account number yet.
    seed_customer(&store, "c2", "Meera", "Shah", "", 2000).await;

    let rows = ScheduleService::new(&store)
        .day_schedule(&AgentId::from("agent-1"), day())
        .await
        .unwrap();
    assert_eq!(row_ids(&rows), ["c1"]);
}

#[tokio::test]
async fn test_rows_join_the_days_payments() {
    let store = MemoryStore::new();
    seed_customer(&store, "c1", "Asha", "Kulkarni", "RD-1", 3000).await;
    seed_customer(&store, "c2", "Meera", "Shah", "RD-2", 2000).await;

    seed_payment(&store, "c1", day(), 500).await;
    // A payment on another day must not leak into this schedule.
    let other: CollectionDay = "2026-08-04".parse().unwrap();
    seed_payment(&store, "c2", other, 900).await;

    let rows = ScheduleService::new(&store)
        .day_schedule(&AgentId::from("agent-1"), day())
        .await
        .unwrap();

    let c1 = rows.iter().find(|r| r.customer.id.as_str() == "c1").unwrap();
    let payment = c1.payment.as_ref().unwrap();
    assert_eq!(payment.amount_paid, Decimal::new(500, 0));
    assert_eq!(payment.id.as_str(), "c1_2026-08-05");

    let c2 = rows.iter().find(|r| r.customer.id.as_str() == "c2").unwrap();
    assert!(c2.payment.is_none());
}

#[tokio::test]
async fn test_recorded_payment_appears_on_reload() {
    let store = MemoryStore::new();
    seed_customer(&store, "c1", "Asha", "Kulkarni", "RD-1", 3000).await;

    let agent = AgentId::from("agent-1");
    PaymentLedger::new(&store)
        .record_payment(&CustomerId::from("c1"), day(), Decimal::new(750, 0), &agent)
        .await
        .unwrap();

    let rows = ScheduleService::new(&store)
        .day_schedule(&agent, day())
        .await
        .unwrap();
    let payment = rows.first().unwrap().payment.as_ref().unwrap();
    assert_eq!(payment.amount_paid, Decimal::new(750, 0));
}
