//! Integration test support for Gullak.
//!
//! Tests exercise the ledger services end to end over the in-memory
//! Ledger Store. This crate provides:
//!
//! - [`CountingStore`] - a store wrapper that counts writes, for asserting
//!   that rejected operations never reach the store
//! - document seeding helpers that write raw wire-form documents, the way
//!   an existing deployment would have left them

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use gullak_core::CollectionDay;
use gullak_ledger::store::{
    DAILY_PAYMENTS, Document, LedgerStore, MemoryStore, StoreError, USERS,
};

/// A Ledger Store wrapper that counts write operations.
///
/// Reads delegate untouched; `create`, `put`, and `update` increment the
/// write counter before delegating.
#[derive(Debug, Default)]
pub struct CountingStore {
    inner: MemoryStore,
    writes: AtomicUsize,
}

impl CountingStore {
    /// Create an empty counting store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of write operations attempted so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerStore for CountingStore {
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.inner.list_all(collection).await
    }

    async fn query_range(
        &self,
        collection: &str,
        field: &str,
        low: &Value,
        high: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        self.inner.query_range(collection, field, low, high).await
    }

    async fn query_equals(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        self.inner.query_equals(collection, field, value).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.inner.get(collection, id).await
    }

    async fn create(&self, collection: &str, fields: Value) -> Result<String, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.create(collection, fields).await
    }

    async fn put(&self, collection: &str, id: &str, fields: Value) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.put(collection, id, fields).await
    }

    async fn update(&self, collection: &str, id: &str, fields: Value) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.update(collection, id, fields).await
    }
}

/// Seed a wire-form customer document under a chosen id.
///
/// # Panics
///
/// Panics if the store write fails; test setup only.
pub async fn seed_customer(
    store: &dyn LedgerStore,
    id: &str,
    first_name: &str,
    last_name: &str,
    account_number: &str,
    denomination: i64,
) {
    store
        .put(
            USERS,
            id,
            json!({
                "accountNumber": account_number,
                "firstName": first_name,
                "lastName": last_name,
                "nomineeName": format!("{first_name} nominee"),
                "address": "14 MG Road, Pune",
                "mobileNumber": 9_876_543_210_i64,
                "denomination": denomination,
                "accountType": "RD",
                "agentId": "agent-1",
                "totalDepositedAmountSoFar": 0,
                "monthPaidUpTo": 0,
                "dateOfLastDeposit": null,
            }),
        )
        .await
        .expect("seed customer");
}

/// Seed a wire-form payment document at the canonical time-of-day for
/// `day`, keyed the way the ledger keys payments.
///
/// # Panics
///
/// Panics if the store write fails; test setup only.
pub async fn seed_payment(store: &dyn LedgerStore, customer_id: &str, day: CollectionDay, amount: i64) {
    store
        .put(
            DAILY_PAYMENTS,
            &format!("{customer_id}_{day}"),
            json!({
                "customerId": customer_id,
                "amountPaid": amount.to_string(),
                "date": day.deposit_time().timestamp_millis(),
                "agentId": "agent-1",
            }),
        )
        .await
        .expect("seed payment");
}
