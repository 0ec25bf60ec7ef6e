//! Repositories over the Ledger Store.
//!
//! Each repository borrows a store handle for the duration of one
//! computation and maps between wire documents and domain models. Row
//! types mirror the stored field names; a document that fails to map is a
//! [`crate::LedgerError::DataCorruption`].

pub mod customers;
pub mod payments;
pub mod visit_order;

pub use customers::CustomerRepository;
pub use payments::PaymentRepository;
pub use visit_order::VisitOrderRepository;
