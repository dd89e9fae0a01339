//! Lifecycle event port announcing personnel changes
//!
//! The manager announces every successful mutation through this port so the
//! component that persists records can react. Receivers are invoked in
//! registration order and awaited one by one; an error from any receiver
//! aborts the remaining notifications and propagates to the caller, so a
//! mutation is not considered durable until the persisting receiver has
//! succeeded.

use crate::collaborator::Collaborator;
use crate::leave::LeaveRequest;
use crate::performance::PerformanceNote;
use crate::Result;
use async_trait::async_trait;

/// Receiver of personnel lifecycle events
///
/// Each callback is invoked once per successful mutation and carries the
/// fully updated entity.
#[async_trait]
pub trait PersonnelEventReceiver: Send + Sync {
    /// A collaborator was created
    async fn on_collaborator_added(&self, collaborator: &Collaborator) -> Result<()>;

    /// A collaborator's fields changed (update, promotion, allowance)
    async fn on_collaborator_updated(&self, collaborator: &Collaborator) -> Result<()>;

    /// A collaborator was deactivated (soft delete)
    async fn on_collaborator_removed(&self, collaborator: &Collaborator) -> Result<()>;

    /// A leave request was evaluated; the embedded collaborator carries the
    /// post-evaluation balance
    async fn on_leave_request_updated(&self, request: &LeaveRequest) -> Result<()>;

    /// A performance note was recorded
    async fn on_performance_logged(&self, note: &PerformanceNote) -> Result<()>;
}
