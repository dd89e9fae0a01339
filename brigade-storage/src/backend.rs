//! Wiring for a ready-to-use personnel system

use crate::calendar::MemoryCalendar;
use crate::memory::MemoryStore;
use crate::persistence::StorePersistence;
use brigade_core::manager::PersonnelManager;
use std::sync::Arc;
use tracing::info;

/// Assembles the store, the schedule view and a manager wired for
/// write-through persistence
pub struct PersonnelBackend {
    store: Arc<MemoryStore>,
    calendar: Arc<MemoryCalendar>,
    manager: Arc<PersonnelManager>,
}

impl PersonnelBackend {
    /// Create a fully wired backend
    ///
    /// The persisting receiver is registered first so later receivers only
    /// observe changes that are already durable.
    pub async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let calendar = Arc::new(MemoryCalendar::new());
        let manager = Arc::new(PersonnelManager::new(store.clone(), calendar.clone()));
        manager
            .register_receiver(Arc::new(StorePersistence::new(store.clone())))
            .await;

        info!("Personnel backend initialized");
        Self {
            store,
            calendar,
            manager,
        }
    }

    /// The role-gated personnel manager
    pub fn manager(&self) -> Arc<PersonnelManager> {
        self.manager.clone()
    }

    /// Direct handle to the store
    pub fn store(&self) -> Arc<MemoryStore> {
        self.store.clone()
    }

    /// Direct handle to the schedule view
    pub fn calendar(&self) -> Arc<MemoryCalendar> {
        self.calendar.clone()
    }
}
