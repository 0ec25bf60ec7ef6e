//! An agent's preferred daily visit sequence.

use serde::{Deserialize, Serialize};

use gullak_core::CustomerId;

/// The persisted visit order for one agent.
///
/// Created lazily on the first explicit reorder and overwritten wholesale
/// on each save - there are no partial or append semantics. Ids of
/// customers that no longer exist are tolerated and skipped at merge time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitOrder {
    /// Customer ids in preferred visit sequence.
    pub order: Vec<CustomerId>,
}

impl VisitOrder {
    /// Wrap an ordered id sequence.
    #[must_use]
    pub const fn new(order: Vec<CustomerId>) -> Self {
        Self { order }
    }
}
