//! The Ledger Store collaborator contract.
//!
//! The store is a document collection with per-document atomicity and
//! nothing more: no transactions, no batch writes, no schema validation,
//! no uniqueness constraints. Everything above this trait is enforced by
//! the caller.
//!
//! # Collections
//!
//! - [`USERS`] - customer documents
//! - [`DAILY_PAYMENTS`] - one payment document per (customer, calendar day)
//! - [`USER_ORDER`] - one visit-order document per agent

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod memory;

pub use memory::MemoryStore;

/// Customer documents.
pub const USERS: &str = "users";
/// Payment documents, keyed by the (customer, day) composite key.
pub const DAILY_PAYMENTS: &str = "dailyPayments";
/// Visit-order documents, keyed by agent id.
pub const USER_ORDER: &str = "userOrder";

/// A stored document: an opaque id plus a JSON object of fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Store-assigned or caller-chosen id, unique within its collection.
    pub id: String,
    /// The document body.
    pub fields: Value,
}

/// Errors surfaced by a Ledger Store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store cannot be reached at all.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// A single read or write failed.
    #[error("store operation failed: {0}")]
    OperationFailed(String),
    /// A write addressed a document that does not exist.
    #[error("document {id} not found in {collection}")]
    NotFound {
        /// Collection the write addressed.
        collection: String,
        /// Document id the write addressed.
        id: String,
    },
}

/// Abstract document store.
///
/// Implementations must provide per-document atomicity for single writes.
/// No ordering is guaranteed across concurrent writers; a failed `update`
/// leaves the prior document state, and a failed `create` simply never
/// happened.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Full scan of a collection, in the store's default order.
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Documents whose `field` lies within `[low, high]`, inclusive on
    /// both ends. Documents missing the field, or whose value is not
    /// comparable to the bounds, are excluded.
    async fn query_range(
        &self,
        collection: &str,
        field: &str,
        low: &Value,
        high: &Value,
    ) -> Result<Vec<Document>, StoreError>;

    /// Documents whose `field` equals `value` exactly.
    async fn query_equals(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError>;

    /// Fetch one document by id.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Create a document with a store-assigned id; returns the id.
    async fn create(&self, collection: &str, fields: Value) -> Result<String, StoreError>;

    /// Write a document wholesale under a caller-chosen id, creating or
    /// replacing it.
    async fn put(&self, collection: &str, id: &str, fields: Value) -> Result<(), StoreError>;

    /// Merge the named top-level fields into an existing document; fields
    /// not named keep their prior values.
    ///
    /// Fails with [`StoreError::NotFound`] if the document is absent.
    async fn update(&self, collection: &str, id: &str, fields: Value) -> Result<(), StoreError>;
}

/// Ordering between two JSON field values, for range filters.
///
/// Numbers compare numerically, strings lexicographically, booleans
/// false-before-true. Mixed or non-scalar types are incomparable.
#[must_use]
pub fn compare_field_values(a: &Value, b: &Value) -> Option<core::cmp::Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64()?;
            let y = y.as_f64()?;
            x.partial_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}
