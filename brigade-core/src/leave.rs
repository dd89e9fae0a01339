//! Leave request domain model and approval workflow types
//!
//! A leave request ties an inclusive calendar-day range to one collaborator
//! and moves through a three-state approval workflow: it is created Pending
//! and transitions exactly once, to Approved or Rejected. Approval is the
//! only operation that consumes the collaborator's vacation-day ledger.
//!
//! # Examples
//!
//! ```rust
//! use brigade_core::collaborator::Collaborator;
//! use brigade_core::leave::*;
//! use chrono::NaiveDate;
//!
//! let collaborator = Collaborator::new("Mario Rossi", "mario@example.com").unwrap();
//! let request = LeaveRequest::new(
//!     collaborator,
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
//! )
//! .unwrap();
//!
//! assert!(request.is_pending());
//! assert_eq!(request.duration(), 5);
//! ```

use crate::collaborator::Collaborator;
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A leave period requested by a collaborator
///
/// Carries its collaborator in full so a loaded request never needs a second
/// lookup to reach the ledger it draws from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaveRequest {
    pub id: Uuid,
    pub collaborator: Collaborator,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: LeaveStatus,
    pub requested_at: DateTime<Utc>,
}

/// Approval status of a leave request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    /// Stable name used in messages and log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "Pending",
            LeaveStatus::Approved => "Approved",
            LeaveStatus::Rejected => "Rejected",
        }
    }

    /// Check if the status admits no further transition
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LeaveStatus::Pending)
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LeaveRequest {
    /// Create a new pending leave request with validation
    pub fn new(
        collaborator: Collaborator,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self> {
        if end_date < start_date {
            return Err(Error::validation("Leave period cannot end before it starts"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            collaborator,
            start_date,
            end_date,
            status: LeaveStatus::Pending,
            requested_at: Utc::now(),
        })
    }

    /// Identity of the collaborator the request belongs to
    pub fn collaborator_id(&self) -> Uuid {
        self.collaborator.id
    }

    /// Inclusive length of the leave period in days
    ///
    /// Both boundary days count, so a same-day request has duration 1.
    pub fn duration(&self) -> u32 {
        ((self.end_date - self.start_date).num_days() + 1) as u32
    }

    /// Transition the request to Approved
    ///
    /// Only a Pending request may transition; Approved and Rejected are
    /// terminal.
    pub fn approve(&mut self) -> Result<()> {
        self.ensure_pending("approve")?;
        self.status = LeaveStatus::Approved;
        Ok(())
    }

    /// Transition the request to Rejected
    pub fn reject(&mut self) -> Result<()> {
        self.ensure_pending("reject")?;
        self.status = LeaveStatus::Rejected;
        Ok(())
    }

    fn ensure_pending(&self, action: &str) -> Result<()> {
        if self.status.is_terminal() {
            return Err(Error::invalid_transition(format!(
                "cannot {} leave request {} already in state {}",
                action, self.id, self.status
            )));
        }
        Ok(())
    }

    /// Check if the request is still awaiting evaluation
    pub fn is_pending(&self) -> bool {
        matches!(self.status, LeaveStatus::Pending)
    }

    /// Check if the request has been approved
    pub fn is_approved(&self) -> bool {
        matches!(self.status, LeaveStatus::Approved)
    }

    /// Check if the request has been rejected
    pub fn is_rejected(&self) -> bool {
        matches!(self.status, LeaveStatus::Rejected)
    }

    /// Check if the request is in a terminal state
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Check whether the period shares at least one day with the given range
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }

    /// Check whether the period covers a specific day
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn collaborator() -> Collaborator {
        Collaborator::new("Mario Rossi", "mario@example.com").unwrap()
    }

    #[test]
    fn test_leave_request_creation() {
        let request =
            LeaveRequest::new(collaborator(), date(2024, 1, 1), date(2024, 1, 5)).unwrap();
        assert!(request.is_pending());
        assert!(!request.is_terminal());
        assert_eq!(request.status, LeaveStatus::Pending);
        assert_eq!(request.collaborator_id(), request.collaborator.id);
    }

    #[test]
    fn test_leave_request_rejects_inverted_range() {
        let result = LeaveRequest::new(collaborator(), date(2024, 1, 5), date(2024, 1, 1));
        assert!(result.is_err());
        assert!(result.unwrap_err().is_validation());
    }

    #[test]
    fn test_duration_is_inclusive() {
        let same_day = LeaveRequest::new(collaborator(), date(2024, 3, 7), date(2024, 3, 7)).unwrap();
        assert_eq!(same_day.duration(), 1);

        let week = LeaveRequest::new(collaborator(), date(2024, 3, 1), date(2024, 3, 7)).unwrap();
        assert_eq!(week.duration(), 7);

        let across_months =
            LeaveRequest::new(collaborator(), date(2024, 1, 30), date(2024, 2, 2)).unwrap();
        assert_eq!(across_months.duration(), 4);
    }

    #[test]
    fn test_approve_is_one_way() {
        let mut request =
            LeaveRequest::new(collaborator(), date(2024, 1, 1), date(2024, 1, 5)).unwrap();

        request.approve().unwrap();
        assert!(request.is_approved());
        assert!(request.is_terminal());

        let err = request.approve().unwrap_err();
        assert_eq!(err.category(), "invalid_transition");

        let err = request.reject().unwrap_err();
        assert_eq!(err.category(), "invalid_transition");
        assert!(request.is_approved());
    }

    #[test]
    fn test_reject_is_one_way() {
        let mut request =
            LeaveRequest::new(collaborator(), date(2024, 1, 1), date(2024, 1, 5)).unwrap();

        request.reject().unwrap();
        assert!(request.is_rejected());

        assert!(request.approve().is_err());
        assert!(request.is_rejected());
    }

    #[test]
    fn test_overlap_detection() {
        let request =
            LeaveRequest::new(collaborator(), date(2024, 5, 10), date(2024, 5, 15)).unwrap();

        // shared boundary day counts as overlap
        assert!(request.overlaps(date(2024, 5, 15), date(2024, 5, 20)));
        assert!(request.overlaps(date(2024, 5, 1), date(2024, 5, 10)));
        assert!(request.overlaps(date(2024, 5, 12), date(2024, 5, 13)));
        assert!(request.overlaps(date(2024, 5, 1), date(2024, 5, 31)));

        assert!(!request.overlaps(date(2024, 5, 16), date(2024, 5, 20)));
        assert!(!request.overlaps(date(2024, 5, 1), date(2024, 5, 9)));
    }

    #[test]
    fn test_covers() {
        let request =
            LeaveRequest::new(collaborator(), date(2024, 5, 10), date(2024, 5, 15)).unwrap();
        assert!(request.covers(date(2024, 5, 10)));
        assert!(request.covers(date(2024, 5, 15)));
        assert!(!request.covers(date(2024, 5, 16)));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(LeaveStatus::Pending.to_string(), "Pending");
        assert!(LeaveStatus::Approved.is_terminal());
        assert!(!LeaveStatus::Pending.is_terminal());
    }
}
