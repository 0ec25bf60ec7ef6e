//! Visit-order repository for Ledger Store operations.

use gullak_core::AgentId;

use crate::error::LedgerError;
use crate::models::visit_order::VisitOrder;
use crate::store::{LedgerStore, USER_ORDER};

/// Repository for per-agent visit-order documents.
///
/// The `userOrder` collection holds one document per agent, keyed by the
/// agent's id. Absent until the agent first saves a reorder.
pub struct VisitOrderRepository<'a> {
    store: &'a dyn LedgerStore,
}

impl<'a> VisitOrderRepository<'a> {
    /// Create a new visit-order repository.
    #[must_use]
    pub const fn new(store: &'a dyn LedgerStore) -> Self {
        Self { store }
    }

    /// Load an agent's saved order, if one has ever been saved.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Store` if the read fails, or
    /// `LedgerError::DataCorruption` if the document does not map.
    pub async fn load(&self, agent_id: &AgentId) -> Result<Option<VisitOrder>, LedgerError> {
        let doc = self.store.get(USER_ORDER, agent_id.as_str()).await?;
        doc.map(|doc| {
            serde_json::from_value(doc.fields).map_err(|e| {
                LedgerError::DataCorruption(format!(
                    "invalid visit order for agent {agent_id}: {e}"
                ))
            })
        })
        .transpose()
    }

    /// Overwrite an agent's order wholesale.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Store` if the write fails.
    pub async fn save(&self, agent_id: &AgentId, order: &VisitOrder) -> Result<(), LedgerError> {
        let fields = serde_json::to_value(order)
            .map_err(|e| LedgerError::DataCorruption(format!("serialize visit order: {e}")))?;
        self.store.put(USER_ORDER, agent_id.as_str(), fields).await?;
        Ok(())
    }
}
