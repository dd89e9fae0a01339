//! In-memory schedule view backing the deactivation gate

use async_trait::async_trait;
use brigade_core::schedule::AssignmentCalendar;
use brigade_core::Result;
use chrono::NaiveDate;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Confirmed shift dates per collaborator
///
/// The booking subsystem owns the real calendar; this implementation keeps
/// just enough of it (confirmed dates) to answer the future-assignment
/// question the personnel core asks.
#[derive(Default)]
pub struct MemoryCalendar {
    shifts: RwLock<HashMap<Uuid, Vec<NaiveDate>>>,
}

impl MemoryCalendar {
    /// Create an empty calendar
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a confirmed shift for a collaborator
    pub async fn record_confirmed_shift(&self, collaborator_id: Uuid, date: NaiveDate) {
        self.shifts
            .write()
            .await
            .entry(collaborator_id)
            .or_default()
            .push(date);
    }
}

#[async_trait]
impl AssignmentCalendar for MemoryCalendar {
    async fn has_confirmed_assignments_after(
        &self,
        collaborator_id: Uuid,
        date: NaiveDate,
    ) -> Result<bool> {
        Ok(self
            .shifts
            .read()
            .await
            .get(&collaborator_id)
            .is_some_and(|dates| dates.iter().any(|d| *d > date)))
    }
}
