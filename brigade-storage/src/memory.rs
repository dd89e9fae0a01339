//! In-memory persistence gateway
//!
//! Backs the `PersonnelStore` port with hash maps behind async read-write
//! locks. The contract matches what a row store would provide: `save`
//! echoes the stored identity, `update` is a full replace that fails for
//! unknown ids, reads return fully populated entities in the documented
//! listing orders.

use async_trait::async_trait;
use brigade_core::collaborator::Collaborator;
use brigade_core::leave::LeaveRequest;
use brigade_core::performance::PerformanceNote;
use brigade_core::store::PersonnelStore;
use brigade_core::{Error, Result};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Hash-map backed implementation of the personnel store
#[derive(Default)]
pub struct MemoryStore {
    collaborators: RwLock<HashMap<Uuid, Collaborator>>,
    leave_requests: RwLock<HashMap<Uuid, LeaveRequest>>,
    performance_notes: RwLock<HashMap<Uuid, PerformanceNote>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of collaborator records, active and inactive
    pub async fn collaborator_count(&self) -> usize {
        self.collaborators.read().await.len()
    }

    /// Number of stored leave requests
    pub async fn leave_request_count(&self) -> usize {
        self.leave_requests.read().await.len()
    }
}

#[async_trait]
impl PersonnelStore for MemoryStore {
    async fn save_collaborator(&self, collaborator: &Collaborator) -> Result<Uuid> {
        debug!("Saving collaborator {}", collaborator.id);
        self.collaborators
            .write()
            .await
            .insert(collaborator.id, collaborator.clone());
        Ok(collaborator.id)
    }

    async fn update_collaborator(&self, collaborator: &Collaborator) -> Result<()> {
        debug!("Updating collaborator {}", collaborator.id);
        let mut collaborators = self.collaborators.write().await;
        if !collaborators.contains_key(&collaborator.id) {
            return Err(Error::not_found(
                "Collaborator",
                collaborator.id.to_string(),
            ));
        }
        collaborators.insert(collaborator.id, collaborator.clone());
        Ok(())
    }

    async fn load_collaborator(&self, id: Uuid) -> Result<Option<Collaborator>> {
        Ok(self.collaborators.read().await.get(&id).cloned())
    }

    async fn load_active_collaborators(&self) -> Result<Vec<Collaborator>> {
        let mut active: Vec<Collaborator> = self
            .collaborators
            .read()
            .await
            .values()
            .filter(|c| c.is_active())
            .cloned()
            .collect();
        active.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(active)
    }

    async fn load_all_collaborators(&self) -> Result<Vec<Collaborator>> {
        let mut all: Vec<Collaborator> =
            self.collaborators.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn save_leave_request(&self, request: &LeaveRequest) -> Result<Uuid> {
        debug!("Saving leave request {}", request.id);
        self.leave_requests
            .write()
            .await
            .insert(request.id, request.clone());
        Ok(request.id)
    }

    async fn update_leave_request(&self, request: &LeaveRequest) -> Result<()> {
        debug!("Updating leave request {}", request.id);
        let mut requests = self.leave_requests.write().await;
        if !requests.contains_key(&request.id) {
            return Err(Error::not_found("LeaveRequest", request.id.to_string()));
        }
        requests.insert(request.id, request.clone());
        Ok(())
    }

    async fn load_leave_request(&self, id: Uuid) -> Result<Option<LeaveRequest>> {
        Ok(self.leave_requests.read().await.get(&id).cloned())
    }

    async fn load_leave_requests_for(&self, collaborator_id: Uuid) -> Result<Vec<LeaveRequest>> {
        let mut history: Vec<LeaveRequest> = self
            .leave_requests
            .read()
            .await
            .values()
            .filter(|r| r.collaborator_id() == collaborator_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.requested_at.cmp(&a.requested_at));
        Ok(history)
    }

    async fn load_pending_leave_requests(&self) -> Result<Vec<LeaveRequest>> {
        let mut pending: Vec<LeaveRequest> = self
            .leave_requests
            .read()
            .await
            .values()
            .filter(|r| r.is_pending())
            .cloned()
            .collect();
        pending.sort_by(|a, b| a.requested_at.cmp(&b.requested_at));
        Ok(pending)
    }

    async fn save_performance_note(&self, note: &PerformanceNote) -> Result<Uuid> {
        debug!("Saving performance note {}", note.id);
        self.performance_notes
            .write()
            .await
            .insert(note.id, note.clone());
        Ok(note.id)
    }

    async fn load_performance_notes_for(
        &self,
        collaborator_id: Uuid,
    ) -> Result<Vec<PerformanceNote>> {
        let mut notes: Vec<PerformanceNote> = self
            .performance_notes
            .read()
            .await
            .values()
            .filter(|n| n.collaborator_id == collaborator_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brigade_core::identity::{Role, User};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_save_and_load_collaborator() {
        let store = MemoryStore::new();
        let collaborator = Collaborator::new("Mario Rossi", "mario@example.com").unwrap();

        let id = store.save_collaborator(&collaborator).await.unwrap();
        assert_eq!(id, collaborator.id);

        let loaded = store.load_collaborator(id).await.unwrap().unwrap();
        assert_eq!(loaded, collaborator);

        assert!(store
            .load_collaborator(Uuid::new_v4())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_unknown_collaborator_is_not_found() {
        let store = MemoryStore::new();
        let collaborator = Collaborator::new("Mario Rossi", "mario@example.com").unwrap();

        let err = store.update_collaborator(&collaborator).await.unwrap_err();
        assert!(err.is_not_found());

        store.save_collaborator(&collaborator).await.unwrap();
        let mut renamed = collaborator.clone();
        renamed.name = "Mario Verdi".to_string();
        store.update_collaborator(&renamed).await.unwrap();

        let loaded = store
            .load_collaborator(collaborator.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.name, "Mario Verdi");
    }

    #[tokio::test]
    async fn test_active_listing_excludes_inactive_and_sorts_by_name() {
        let store = MemoryStore::new();

        let zoe = Collaborator::new("Zoe Costa", "zoe@example.com").unwrap();
        let anna = Collaborator::new("Anna Bianchi", "anna@example.com").unwrap();
        let mut mario = Collaborator::new("Mario Rossi", "mario@example.com").unwrap();
        mario.deactivate();

        store.save_collaborator(&zoe).await.unwrap();
        store.save_collaborator(&anna).await.unwrap();
        store.save_collaborator(&mario).await.unwrap();

        let active = store.load_active_collaborators().await.unwrap();
        let names: Vec<&str> = active.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Anna Bianchi", "Zoe Costa"]);

        let all = store.load_all_collaborators().await.unwrap();
        let names: Vec<&str> = all.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Anna Bianchi", "Mario Rossi", "Zoe Costa"]);
    }

    #[tokio::test]
    async fn test_leave_history_is_newest_first() {
        let store = MemoryStore::new();
        let collaborator = Collaborator::new("Mario Rossi", "mario@example.com").unwrap();

        let mut older =
            LeaveRequest::new(collaborator.clone(), date(2024, 1, 2), date(2024, 1, 3)).unwrap();
        older.requested_at = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let mut newer =
            LeaveRequest::new(collaborator.clone(), date(2024, 5, 6), date(2024, 5, 7)).unwrap();
        newer.requested_at = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();

        store.save_leave_request(&older).await.unwrap();
        store.save_leave_request(&newer).await.unwrap();

        let history = store
            .load_leave_requests_for(collaborator.id)
            .await
            .unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, newer.id);
        assert_eq!(history[1].id, older.id);

        // Unrelated collaborators see an empty history
        let other = store.load_leave_requests_for(Uuid::new_v4()).await.unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn test_pending_listing_is_oldest_first_and_skips_terminal() {
        let store = MemoryStore::new();
        let collaborator = Collaborator::new("Mario Rossi", "mario@example.com").unwrap();

        let mut first =
            LeaveRequest::new(collaborator.clone(), date(2024, 1, 2), date(2024, 1, 3)).unwrap();
        first.requested_at = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let mut second =
            LeaveRequest::new(collaborator.clone(), date(2024, 2, 2), date(2024, 2, 3)).unwrap();
        second.requested_at = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let mut rejected =
            LeaveRequest::new(collaborator.clone(), date(2024, 3, 2), date(2024, 3, 3)).unwrap();
        rejected.reject().unwrap();

        store.save_leave_request(&first).await.unwrap();
        store.save_leave_request(&second).await.unwrap();
        store.save_leave_request(&rejected).await.unwrap();

        let pending = store.load_pending_leave_requests().await.unwrap();
        let ids: Vec<Uuid> = pending.iter().map(|r| r.id).collect();
        assert_eq!(ids, [first.id, second.id]);
    }

    #[tokio::test]
    async fn test_performance_notes_are_newest_first() {
        let store = MemoryStore::new();
        let collaborator_id = Uuid::new_v4();
        let author = User::new("chiara", vec![Role::Organizer]).unwrap();

        let mut older = PerformanceNote::new(collaborator_id, None, author.clone(), "solid prep");
        older.recorded_at = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let mut newer = PerformanceNote::new(collaborator_id, None, author, "led the line");
        newer.recorded_at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();

        store.save_performance_note(&older).await.unwrap();
        store.save_performance_note(&newer).await.unwrap();

        let notes = store
            .load_performance_notes_for(collaborator_id)
            .await
            .unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].body, "led the line");
        assert_eq!(notes[1].body, "solid prep");
    }
}
