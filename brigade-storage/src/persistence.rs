//! Event receiver that persists personnel changes through the store

use async_trait::async_trait;
use brigade_core::collaborator::Collaborator;
use brigade_core::events::PersonnelEventReceiver;
use brigade_core::leave::LeaveRequest;
use brigade_core::performance::PerformanceNote;
use brigade_core::store::PersonnelStore;
use brigade_core::Result;
use std::sync::Arc;
use tracing::debug;

/// Writes every announced change through the persistence gateway
///
/// Registered first on the manager, so a mutation only reports success once
/// its record is stored.
pub struct StorePersistence {
    store: Arc<dyn PersonnelStore>,
}

impl StorePersistence {
    /// Create a receiver writing through the given store
    pub fn new(store: Arc<dyn PersonnelStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PersonnelEventReceiver for StorePersistence {
    async fn on_collaborator_added(&self, collaborator: &Collaborator) -> Result<()> {
        debug!("Persisting new collaborator {}", collaborator.id);
        self.store.save_collaborator(collaborator).await?;
        Ok(())
    }

    async fn on_collaborator_updated(&self, collaborator: &Collaborator) -> Result<()> {
        debug!("Persisting update of collaborator {}", collaborator.id);
        self.store.update_collaborator(collaborator).await
    }

    async fn on_collaborator_removed(&self, collaborator: &Collaborator) -> Result<()> {
        // Soft delete: removal stores the record with its Inactive status
        debug!("Persisting deactivation of collaborator {}", collaborator.id);
        self.store.update_collaborator(collaborator).await
    }

    async fn on_leave_request_updated(&self, request: &LeaveRequest) -> Result<()> {
        debug!("Persisting evaluation of leave request {}", request.id);
        // The evaluated request embeds the post-evaluation balance; both
        // records go back to the store
        self.store.update_leave_request(request).await?;
        self.store.update_collaborator(&request.collaborator).await
    }

    async fn on_performance_logged(&self, note: &PerformanceNote) -> Result<()> {
        debug!("Persisting performance note {}", note.id);
        self.store.save_performance_note(note).await?;
        Ok(())
    }
}
