//! Performance note domain model
//!
//! A performance note is a timestamped free-text evaluation of a
//! collaborator, written by a user and optionally tied to the event the
//! observation was made at. Notes are immutable once created; the history
//! of a collaborator is append-only.

use crate::identity::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An immutable evaluation of a collaborator
///
/// The event reference is an opaque identifier owned by the scheduling
/// subsystem; it is stored and returned but never dereferenced here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceNote {
    pub id: Uuid,
    pub collaborator_id: Uuid,
    pub event_id: Option<Uuid>,
    pub author: User,
    pub body: String,
    pub recorded_at: DateTime<Utc>,
}

impl PerformanceNote {
    /// Create a new note stamped with the current time
    ///
    /// The body is stored verbatim; the referenced collaborator and the
    /// author are the only required pieces.
    pub fn new<S: Into<String>>(
        collaborator_id: Uuid,
        event_id: Option<Uuid>,
        author: User,
        body: S,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            collaborator_id,
            event_id,
            author,
            body: body.into(),
            recorded_at: Utc::now(),
        }
    }

    /// Check if the note is tied to an event
    pub fn references_event(&self) -> bool {
        self.event_id.is_some()
    }

    /// Get the note's age in seconds
    pub fn age_seconds(&self) -> i64 {
        Utc::now()
            .signed_duration_since(self.recorded_at)
            .num_seconds()
    }
}
