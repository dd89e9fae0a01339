//! Schedule port used by the deactivation gate
//!
//! Shift booking lives in its own subsystem; the personnel core only ever
//! asks one question of it: does this collaborator hold a confirmed
//! assignment after a given day. The answer, combined with approved leave
//! periods from the store, decides whether a collaborator may be
//! deactivated.

use crate::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// Read-only view of confirmed work assignments
#[async_trait]
pub trait AssignmentCalendar: Send + Sync {
    /// Check whether the collaborator has a confirmed assignment dated
    /// strictly after `date`
    async fn has_confirmed_assignments_after(
        &self,
        collaborator_id: Uuid,
        date: NaiveDate,
    ) -> Result<bool>;
}
