//! Core types for Gullak.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod account;
pub mod amount;
pub mod day;
pub mod id;

pub use account::AccountType;
pub use amount::{Amount, AmountError, Denomination, DenominationError};
pub use day::CollectionDay;
pub use id::*;
