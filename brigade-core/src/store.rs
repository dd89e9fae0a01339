//! Persistence gateway consumed by the personnel manager
//!
//! The manager never talks to rows or query text; it loads and stores whole
//! entities through this port. Implementations own identity reconciliation
//! (`save` echoes the stored id), full-replace update semantics, and the
//! listing orders callers rely on.

use crate::collaborator::Collaborator;
use crate::leave::LeaveRequest;
use crate::performance::PerformanceNote;
use crate::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Storage port for personnel entities
///
/// Reads return fully populated entities: a loaded [`LeaveRequest`] carries
/// its collaborator. `update_*` is a full replace keyed by identity and
/// fails with a not-found error for an id that was never saved.
#[async_trait]
pub trait PersonnelStore: Send + Sync {
    /// Persist a new collaborator and return its identity
    async fn save_collaborator(&self, collaborator: &Collaborator) -> Result<Uuid>;

    /// Replace a stored collaborator
    async fn update_collaborator(&self, collaborator: &Collaborator) -> Result<()>;

    /// Load a collaborator by id
    async fn load_collaborator(&self, id: Uuid) -> Result<Option<Collaborator>>;

    /// Load all active collaborators, sorted by name
    async fn load_active_collaborators(&self) -> Result<Vec<Collaborator>>;

    /// Load every collaborator including inactive ones, sorted by name
    async fn load_all_collaborators(&self) -> Result<Vec<Collaborator>>;

    /// Persist a new leave request and return its identity
    async fn save_leave_request(&self, request: &LeaveRequest) -> Result<Uuid>;

    /// Replace a stored leave request
    async fn update_leave_request(&self, request: &LeaveRequest) -> Result<()>;

    /// Load a leave request by id
    async fn load_leave_request(&self, id: Uuid) -> Result<Option<LeaveRequest>>;

    /// Load a collaborator's leave requests, newest first
    async fn load_leave_requests_for(&self, collaborator_id: Uuid) -> Result<Vec<LeaveRequest>>;

    /// Load all pending leave requests, oldest first
    async fn load_pending_leave_requests(&self) -> Result<Vec<LeaveRequest>>;

    /// Persist a new performance note and return its identity
    async fn save_performance_note(&self, note: &PerformanceNote) -> Result<Uuid>;

    /// Load a collaborator's performance notes, newest first
    async fn load_performance_notes_for(
        &self,
        collaborator_id: Uuid,
    ) -> Result<Vec<PerformanceNote>>;
}
