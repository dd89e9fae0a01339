//! Personnel manager: role-gated entry point for staff mutations
//!
//! Every mutating operation follows the same protocol: check the acting
//! user's role, mutate a freshly loaded entity, then announce the change to
//! the registered event receivers in registration order. The receiver that
//! persists records runs inside that loop, so an operation only reports
//! success once its effect is durable; a receiver error propagates to the
//! caller and the stored state keeps its prior value.
//!
//! Mutations touching one collaborator are serialized through a
//! per-collaborator lock so the vacation-balance read-modify-write and the
//! assignment-check-then-deactivate sequence never interleave.

use crate::collaborator::{Collaborator, CollaboratorUpdate};
use crate::events::PersonnelEventReceiver;
use crate::identity::{Role, User};
use crate::leave::LeaveRequest;
use crate::performance::PerformanceNote;
use crate::schedule::AssignmentCalendar;
use crate::store::PersonnelStore;
use crate::{Error, Result};
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Decision applied to a pending leave request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveDecision {
    Approve,
    Reject,
}

/// Role-gated façade over collaborators, leave requests and performance notes
pub struct PersonnelManager {
    store: Arc<dyn PersonnelStore>,
    calendar: Arc<dyn AssignmentCalendar>,
    receivers: RwLock<Vec<Arc<dyn PersonnelEventReceiver>>>,
    /// Per-collaborator write serialization
    record_locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
    /// Serializes contact-uniqueness check-then-save sequences
    intake_lock: Mutex<()>,
    /// Transient pointer to the profile viewed last
    current_profile: RwLock<Option<Collaborator>>,
}

impl PersonnelManager {
    /// Create a new manager over the given store and schedule view
    pub fn new(store: Arc<dyn PersonnelStore>, calendar: Arc<dyn AssignmentCalendar>) -> Self {
        Self {
            store,
            calendar,
            receivers: RwLock::new(Vec::new()),
            record_locks: Mutex::new(HashMap::new()),
            intake_lock: Mutex::new(()),
            current_profile: RwLock::new(None),
        }
    }

    /// Register an event receiver; receivers fire in registration order
    pub async fn register_receiver(&self, receiver: Arc<dyn PersonnelEventReceiver>) {
        self.receivers.write().await.push(receiver);
    }

    /// Remove a previously registered receiver
    pub async fn unregister_receiver(&self, receiver: &Arc<dyn PersonnelEventReceiver>) {
        self.receivers
            .write()
            .await
            .retain(|existing| !same_receiver(existing, receiver));
    }

    /// Number of registered receivers
    pub async fn receiver_count(&self) -> usize {
        self.receivers.read().await.len()
    }

    /// Add a new collaborator to the roster
    ///
    /// Owner only. The contact must not belong to any active collaborator.
    pub async fn add_collaborator<S1: Into<String>, S2: Into<String>>(
        &self,
        actor: &User,
        name: S1,
        contact: S2,
    ) -> Result<Collaborator> {
        self.require_owner(actor, "add collaborator")?;

        let name = name.into();
        let contact = contact.into();
        info!("Adding collaborator: {} (by {})", name, actor.username);

        let _intake = self.intake_lock.lock().await;
        let collaborator = Collaborator::new(name, contact)?;
        self.ensure_contact_free(&collaborator.contact, None).await?;

        self.notify_collaborator_added(&collaborator).await?;

        info!(
            "Successfully added collaborator: {} ({})",
            collaborator.name, collaborator.id
        );
        Ok(collaborator)
    }

    /// Update a collaborator's descriptive fields
    ///
    /// Organizer or Owner. Blank or absent fields stay untouched; changing
    /// the contact re-enters the uniqueness check.
    pub async fn update_collaborator(
        &self,
        actor: &User,
        collaborator_id: Uuid,
        update: CollaboratorUpdate,
    ) -> Result<Collaborator> {
        self.require_organizer(actor, "update collaborator info")?;

        let lock = self.record_lock(collaborator_id).await;
        let _guard = lock.lock().await;

        let mut collaborator = self.load_required(collaborator_id).await?;

        let _intake = match update.contact.as_deref().filter(|c| !c.trim().is_empty()) {
            Some(contact) if contact != collaborator.contact => {
                let guard = self.intake_lock.lock().await;
                self.ensure_contact_free(contact, Some(collaborator_id))
                    .await?;
                Some(guard)
            }
            _ => None,
        };

        collaborator.apply_update(&update);
        self.notify_collaborator_updated(&collaborator).await?;

        info!(
            "Updated collaborator: {} ({})",
            collaborator.name, collaborator.id
        );
        Ok(collaborator)
    }

    /// Deactivate a collaborator (soft delete)
    ///
    /// Organizer or Owner. Blocked while the collaborator holds a confirmed
    /// assignment or an approved leave period after today.
    pub async fn remove_collaborator(
        &self,
        actor: &User,
        collaborator_id: Uuid,
    ) -> Result<Collaborator> {
        self.require_organizer(actor, "remove collaborator")?;

        let lock = self.record_lock(collaborator_id).await;
        let _guard = lock.lock().await;

        let mut collaborator = self.load_required(collaborator_id).await?;

        let today = Utc::now().date_naive();
        if self
            .has_future_commitments_after(collaborator_id, today)
            .await?
        {
            warn!(
                "Deactivation of collaborator {} blocked by future commitments",
                collaborator_id
            );
            return Err(Error::active_assignments(collaborator_id));
        }

        collaborator.deactivate();
        self.notify_collaborator_removed(&collaborator).await?;

        info!(
            "Deactivated collaborator: {} ({})",
            collaborator.name, collaborator.id
        );
        Ok(collaborator)
    }

    /// Promote an occasional collaborator to the permanent tier
    ///
    /// Owner only; fails when the collaborator is already permanent.
    pub async fn promote_collaborator(
        &self,
        actor: &User,
        collaborator_id: Uuid,
    ) -> Result<Collaborator> {
        self.require_owner(actor, "promote collaborator")?;

        let lock = self.record_lock(collaborator_id).await;
        let _guard = lock.lock().await;

        let mut collaborator = self.load_required(collaborator_id).await?;
        if !collaborator.is_occasional() {
            return Err(Error::invalid_transition(format!(
                "collaborator {} is already permanent",
                collaborator.id
            )));
        }

        collaborator.promote();
        self.notify_collaborator_updated(&collaborator).await?;

        info!(
            "Promoted collaborator: {} ({})",
            collaborator.name, collaborator.id
        );
        Ok(collaborator)
    }

    /// Replace a collaborator's vacation allowance
    ///
    /// Owner only.
    pub async fn set_vacation_allowance(
        &self,
        actor: &User,
        collaborator_id: Uuid,
        days: u32,
    ) -> Result<Collaborator> {
        self.require_owner(actor, "set vacation allowance")?;

        let lock = self.record_lock(collaborator_id).await;
        let _guard = lock.lock().await;

        let mut collaborator = self.load_required(collaborator_id).await?;
        collaborator.set_vacation_allowance(days);
        self.notify_collaborator_updated(&collaborator).await?;

        info!(
            "Set vacation allowance of collaborator {} to {} days",
            collaborator.id, days
        );
        Ok(collaborator)
    }

    /// Record a new pending leave request
    ///
    /// Open to any authenticated user. The collaborator must be active and
    /// the period must not intersect any of their approved requests.
    pub async fn submit_leave_request(
        &self,
        actor: &User,
        collaborator_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<LeaveRequest> {
        debug!(
            "Leave submission for collaborator {} by {}: {} to {}",
            collaborator_id, actor.username, start_date, end_date
        );

        let lock = self.record_lock(collaborator_id).await;
        let _guard = lock.lock().await;

        let collaborator = self.load_required(collaborator_id).await?;
        if !collaborator.can_request_leave() {
            return Err(Error::validation(format!(
                "collaborator {} is inactive and cannot request leave",
                collaborator_id
            )));
        }

        let request = LeaveRequest::new(collaborator, start_date, end_date)?;
        self.ensure_no_approved_overlap(&request).await?;

        self.store.save_leave_request(&request).await?;

        info!(
            "Recorded leave request {} for collaborator {} ({} days)",
            request.id,
            request.collaborator_id(),
            request.duration()
        );
        Ok(request)
    }

    /// Approve or reject a pending leave request
    ///
    /// Owner only. Approval draws the inclusive duration from the
    /// collaborator's vacation balance; a rejection has no balance effect.
    /// Either outcome is announced with the updated request.
    pub async fn evaluate_leave_request(
        &self,
        actor: &User,
        request_id: Uuid,
        decision: LeaveDecision,
    ) -> Result<LeaveRequest> {
        self.require_owner(actor, "evaluate leave request")?;

        let preview = self.load_required_request(request_id).await?;

        let lock = self.record_lock(preview.collaborator_id()).await;
        let _guard = lock.lock().await;

        // Reload under the lock so the balance check runs against fresh state
        let mut request = self.load_required_request(request_id).await?;
        if request.is_terminal() {
            return Err(Error::invalid_transition(format!(
                "leave request {} was already {}",
                request.id, request.status
            )));
        }

        match decision {
            LeaveDecision::Approve => {
                self.ensure_no_approved_overlap(&request).await?;

                let mut collaborator = self.load_required(request.collaborator_id()).await?;
                let duration = request.duration();
                if let Err(err) = collaborator.reduce_vacation_days(duration) {
                    warn!("Approval of leave request {} denied: {}", request.id, err);
                    return Err(err);
                }
                request.collaborator = collaborator;
                request.approve()?;
            }
            LeaveDecision::Reject => {
                // Refresh the embedded record so the announcement carries
                // current data
                request.collaborator = self.load_required(request.collaborator_id()).await?;
                request.reject()?;
            }
        }

        self.notify_leave_request_updated(&request).await?;

        info!(
            "Leave request {} now {} (collaborator {}, {} days, by {})",
            request.id,
            request.status,
            request.collaborator_id(),
            request.duration(),
            actor.username
        );
        Ok(request)
    }

    /// Record an immutable performance note
    ///
    /// Organizer or Owner; the acting user becomes the author.
    pub async fn log_performance<S: Into<String>>(
        &self,
        actor: &User,
        collaborator_id: Uuid,
        event_id: Option<Uuid>,
        body: S,
    ) -> Result<PerformanceNote> {
        self.require_organizer(actor, "log performance note")?;

        // Notes reference the collaborator by id; make sure it exists
        self.load_required(collaborator_id).await?;

        let note = PerformanceNote::new(collaborator_id, event_id, actor.clone(), body);
        self.notify_performance_logged(&note).await?;

        info!(
            "Logged performance note {} for collaborator {} (by {})",
            note.id, collaborator_id, actor.username
        );
        Ok(note)
    }

    /// List active collaborators, sorted by name
    pub async fn collaborator_list(&self, actor: &User) -> Result<Vec<Collaborator>> {
        debug!("Listing active collaborators for {}", actor.username);
        self.store.load_active_collaborators().await
    }

    /// List every collaborator including deactivated ones
    pub async fn all_collaborators(&self, actor: &User) -> Result<Vec<Collaborator>> {
        debug!("Listing all collaborators for {}", actor.username);
        self.store.load_all_collaborators().await
    }

    /// Load one collaborator and remember it as the viewed profile
    pub async fn collaborator_profile(
        &self,
        actor: &User,
        collaborator_id: Uuid,
    ) -> Result<Collaborator> {
        debug!(
            "Loading profile of collaborator {} for {}",
            collaborator_id, actor.username
        );
        let collaborator = self.load_required(collaborator_id).await?;
        *self.current_profile.write().await = Some(collaborator.clone());
        Ok(collaborator)
    }

    /// The profile viewed last, if any
    pub async fn current_profile(&self) -> Option<Collaborator> {
        self.current_profile.read().await.clone()
    }

    /// A collaborator's leave requests, newest first
    pub async fn leave_history(
        &self,
        actor: &User,
        collaborator_id: Uuid,
    ) -> Result<Vec<LeaveRequest>> {
        debug!(
            "Loading leave history of collaborator {} for {}",
            collaborator_id, actor.username
        );
        self.store.load_leave_requests_for(collaborator_id).await
    }

    /// All leave requests still awaiting evaluation, oldest first
    pub async fn pending_leave_requests(&self, actor: &User) -> Result<Vec<LeaveRequest>> {
        debug!("Listing pending leave requests for {}", actor.username);
        self.store.load_pending_leave_requests().await
    }

    /// A collaborator's performance notes, newest first
    pub async fn performance_history(
        &self,
        actor: &User,
        collaborator_id: Uuid,
    ) -> Result<Vec<PerformanceNote>> {
        debug!(
            "Loading performance history of collaborator {} for {}",
            collaborator_id, actor.username
        );
        self.store.load_performance_notes_for(collaborator_id).await
    }

    /// Check for confirmed assignments or approved leave after today
    pub async fn has_future_commitments(&self, collaborator_id: Uuid) -> Result<bool> {
        self.has_future_commitments_after(collaborator_id, Utc::now().date_naive())
            .await
    }

    async fn has_future_commitments_after(
        &self,
        collaborator_id: Uuid,
        date: NaiveDate,
    ) -> Result<bool> {
        if self
            .calendar
            .has_confirmed_assignments_after(collaborator_id, date)
            .await?
        {
            return Ok(true);
        }
        let requests = self.store.load_leave_requests_for(collaborator_id).await?;
        Ok(requests
            .iter()
            .any(|request| request.is_approved() && request.end_date > date))
    }

    fn require_owner(&self, actor: &User, action: &str) -> Result<()> {
        if !actor.is_owner() {
            warn!(
                "Denied '{}' for {}: requires the {} role",
                action,
                actor.username,
                Role::Owner
            );
            return Err(Error::permission_denied(action, Role::Owner));
        }
        Ok(())
    }

    fn require_organizer(&self, actor: &User, action: &str) -> Result<()> {
        if !actor.is_organizer() {
            warn!(
                "Denied '{}' for {}: requires the {} role",
                action,
                actor.username,
                Role::Organizer
            );
            return Err(Error::permission_denied(action, Role::Organizer));
        }
        Ok(())
    }

    async fn load_required(&self, collaborator_id: Uuid) -> Result<Collaborator> {
        self.store
            .load_collaborator(collaborator_id)
            .await?
            .ok_or_else(|| Error::not_found("Collaborator", collaborator_id.to_string()))
    }

    async fn load_required_request(&self, request_id: Uuid) -> Result<LeaveRequest> {
        self.store
            .load_leave_request(request_id)
            .await?
            .ok_or_else(|| Error::not_found("LeaveRequest", request_id.to_string()))
    }

    async fn ensure_contact_free(&self, contact: &str, exclude: Option<Uuid>) -> Result<()> {
        let active = self.store.load_active_collaborators().await?;
        let taken = active
            .iter()
            .any(|c| c.contact == contact && Some(c.id) != exclude);
        if taken {
            warn!("Contact already held by an active collaborator: {}", contact);
            return Err(Error::duplicate_contact(contact));
        }
        Ok(())
    }

    async fn ensure_no_approved_overlap(&self, request: &LeaveRequest) -> Result<()> {
        let existing = self
            .store
            .load_leave_requests_for(request.collaborator_id())
            .await?;
        let conflict = existing.iter().any(|other| {
            other.id != request.id
                && other.is_approved()
                && other.overlaps(request.start_date, request.end_date)
        });
        if conflict {
            warn!(
                "Leave request {} overlaps an approved period of collaborator {}",
                request.id,
                request.collaborator_id()
            );
            return Err(Error::overlapping_leave(
                request.collaborator_id(),
                request.start_date,
                request.end_date,
            ));
        }
        Ok(())
    }

    async fn record_lock(&self, collaborator_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.record_locks.lock().await;
        locks
            .entry(collaborator_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn snapshot_receivers(&self) -> Vec<Arc<dyn PersonnelEventReceiver>> {
        self.receivers.read().await.clone()
    }

    async fn notify_collaborator_added(&self, collaborator: &Collaborator) -> Result<()> {
        let receivers = self.snapshot_receivers().await;
        debug!(
            "Notifying {} receivers: collaborator {} added",
            receivers.len(),
            collaborator.id
        );
        for receiver in receivers {
            receiver.on_collaborator_added(collaborator).await?;
        }
        Ok(())
    }

    async fn notify_collaborator_updated(&self, collaborator: &Collaborator) -> Result<()> {
        let receivers = self.snapshot_receivers().await;
        debug!(
            "Notifying {} receivers: collaborator {} updated",
            receivers.len(),
            collaborator.id
        );
        for receiver in receivers {
            receiver.on_collaborator_updated(collaborator).await?;
        }
        Ok(())
    }

    async fn notify_collaborator_removed(&self, collaborator: &Collaborator) -> Result<()> {
        let receivers = self.snapshot_receivers().await;
        debug!(
            "Notifying {} receivers: collaborator {} removed",
            receivers.len(),
            collaborator.id
        );
        for receiver in receivers {
            receiver.on_collaborator_removed(collaborator).await?;
        }
        Ok(())
    }

    async fn notify_leave_request_updated(&self, request: &LeaveRequest) -> Result<()> {
        let receivers = self.snapshot_receivers().await;
        debug!(
            "Notifying {} receivers: leave request {} updated",
            receivers.len(),
            request.id
        );
        for receiver in receivers {
            receiver.on_leave_request_updated(request).await?;
        }
        Ok(())
    }

    async fn notify_performance_logged(&self, note: &PerformanceNote) -> Result<()> {
        let receivers = self.snapshot_receivers().await;
        debug!(
            "Notifying {} receivers: performance note {} logged",
            receivers.len(),
            note.id
        );
        for receiver in receivers {
            receiver.on_performance_logged(note).await?;
        }
        Ok(())
    }
}

fn same_receiver(a: &Arc<dyn PersonnelEventReceiver>, b: &Arc<dyn PersonnelEventReceiver>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}
