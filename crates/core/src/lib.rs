//! Gullak Core - Shared domain types.
//!
//! This crate provides common types used across all Gullak components:
//! - `ledger` - Scheduling-and-reconciliation core over the Ledger Store
//! - `server` - JSON API exposing the ledger operations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no store access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, amounts, denominations,
//!   and calendar days

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
