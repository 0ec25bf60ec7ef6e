//! Unified error taxonomy for ledger operations.

use thiserror::Error;

use gullak_core::AmountError;

use crate::models::customer::ValidationError;
use crate::store::StoreError;

/// Errors surfaced by the ledger services and repositories.
///
/// Validation failures (`InvalidAmount`, `Validation`) are raised before
/// any store traffic; store failures are propagated to the initiating
/// caller with no retry and no rollback.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A payment amount failed numeric validation.
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    /// A customer record failed field validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The Ledger Store rejected or could not complete an operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A stored document does not map onto its model.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// A referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = LedgerError::NotFound("customer c-9".to_owned());
        assert_eq!(err.to_string(), "customer c-9 not found");

        let err = LedgerError::Validation(ValidationError::MissingField("firstName"));
        assert_eq!(
            err.to_string(),
            "validation failed: missing required field: firstName"
        );
    }
}
