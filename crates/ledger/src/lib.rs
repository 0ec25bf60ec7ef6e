//! Gullak Ledger - the scheduling-and-reconciliation core.
//!
//! Agents record daily cash installments from recurring-deposit customers
//! and review progress against each customer's pledged denomination. This
//! crate owns the parts with real invariants:
//!
//! - [`schedule`] - a stable, agent-customizable daily visit order over a
//!   changing customer set
//! - [`payments`] - at most one payment per customer per calendar day,
//!   with create-or-update semantics
//! - [`summary`] - range aggregation of payments against each customer's
//!   target
//! - [`dashboard`] - the fixed today / trailing-30-day reporting windows
//!
//! Persistence is the [`store::LedgerStore`] collaborator: a document
//! collection with per-document atomicity and nothing more. Everything
//! here holds only transient projections for the duration of one call.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod dashboard;
pub mod error;
pub mod models;
pub mod payments;
pub mod repo;
pub mod schedule;
pub mod store;
pub mod summary;

pub use error::LedgerError;
