//! Domain models backed by Ledger Store documents.

pub mod customer;
pub mod payment;
pub mod visit_order;

pub use customer::{Customer, CustomerUpdate, NewCustomer, ValidationError};
pub use payment::Payment;
pub use visit_order::VisitOrder;
