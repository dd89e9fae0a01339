//! Error types for the personnel domain

use crate::identity::Role;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Core error type for personnel operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Permission denied: {action} requires the {required} role")]
    PermissionDenied { action: String, required: Role },

    #[error("Insufficient vacation balance: requested {requested} days, {available} available")]
    InsufficientVacationBalance { requested: u32, available: u32 },

    #[error("Duplicate contact: {contact} already belongs to an active collaborator")]
    DuplicateContact { contact: String },

    #[error("Active assignments exist: collaborator {collaborator_id} has confirmed commitments after today")]
    ActiveAssignmentsExist { collaborator_id: Uuid },

    #[error("Overlapping leave request: {start} to {end} intersects an approved period of collaborator {collaborator_id}")]
    OverlappingLeaveRequest {
        collaborator_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Invalid state transition: {message}")]
    InvalidStateTransition { message: String },

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Gateway error: {message}")]
    Gateway { message: String },
}

impl Error {
    /// Create a validation error with a formatted message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a permission denied error naming the role the action requires
    pub fn permission_denied<S: Into<String>>(action: S, required: Role) -> Self {
        Self::PermissionDenied {
            action: action.into(),
            required,
        }
    }

    /// Create an insufficient vacation balance error
    pub fn insufficient_balance(requested: u32, available: u32) -> Self {
        Self::InsufficientVacationBalance {
            requested,
            available,
        }
    }

    /// Create a duplicate contact error
    pub fn duplicate_contact<S: Into<String>>(contact: S) -> Self {
        Self::DuplicateContact {
            contact: contact.into(),
        }
    }

    /// Create an error for a deactivation blocked by future commitments
    pub fn active_assignments(collaborator_id: Uuid) -> Self {
        Self::ActiveAssignmentsExist { collaborator_id }
    }

    /// Create an overlapping leave request error
    pub fn overlapping_leave(collaborator_id: Uuid, start: NaiveDate, end: NaiveDate) -> Self {
        Self::OverlappingLeaveRequest {
            collaborator_id,
            start,
            end,
        }
    }

    /// Create an invalid state transition error
    pub fn invalid_transition<S: Into<String>>(message: S) -> Self {
        Self::InvalidStateTransition {
            message: message.into(),
        }
    }

    /// Create a not found error for a specific entity type and ID
    pub fn not_found<S1: Into<String>, S2: Into<String>>(entity_type: S1, id: S2) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Create a gateway error for a failing persistence or schedule dependency
    pub fn gateway<S: Into<String>>(message: S) -> Self {
        Self::Gateway {
            message: message.into(),
        }
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Check if this error is a permission denied error
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Error::PermissionDenied { .. })
    }

    /// Check if this error is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if this error is recoverable (client can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Gateway { .. })
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::Validation { .. } => "validation",
            Error::PermissionDenied { .. } => "permission_denied",
            Error::InsufficientVacationBalance { .. } => "insufficient_balance",
            Error::DuplicateContact { .. } => "duplicate_contact",
            Error::ActiveAssignmentsExist { .. } => "active_assignments",
            Error::OverlappingLeaveRequest { .. } => "overlapping_leave",
            Error::InvalidStateTransition { .. } => "invalid_transition",
            Error::NotFound { .. } => "not_found",
            Error::Gateway { .. } => "gateway",
        }
    }
}

/// Convenience result type for personnel operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let validation_err = Error::validation("Test validation error");
        assert!(validation_err.is_validation());
        assert!(!validation_err.is_not_found());
        assert_eq!(validation_err.category(), "validation");

        let not_found_err = Error::not_found("Collaborator", "123");
        assert!(not_found_err.is_not_found());
        assert!(!not_found_err.is_validation());
        assert_eq!(not_found_err.category(), "not_found");

        let permission_err = Error::permission_denied("add collaborator", Role::Owner);
        assert!(permission_err.is_permission_denied());
        assert_eq!(permission_err.category(), "permission_denied");
    }

    #[test]
    fn test_error_recoverability() {
        let validation_err = Error::validation("Invalid input");
        assert!(!validation_err.is_recoverable());

        let balance_err = Error::insufficient_balance(5, 2);
        assert!(!balance_err.is_recoverable());

        let gateway_err = Error::gateway("store unavailable");
        assert!(gateway_err.is_recoverable());
    }

    #[test]
    fn test_permission_display_names_required_role() {
        let err = Error::permission_denied("add collaborator", Role::Owner);
        let display_str = format!("{}", err);
        assert!(display_str.contains("add collaborator"));
        assert!(display_str.contains("Owner"));
    }

    #[test]
    fn test_balance_display_carries_amounts() {
        let err = Error::insufficient_balance(7, 3);
        let display_str = format!("{}", err);
        assert!(display_str.contains("requested 7"));
        assert!(display_str.contains("3 available"));
    }

    #[test]
    fn test_overlap_display_carries_range() {
        let id = Uuid::new_v4();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let err = Error::overlapping_leave(id, start, end);
        let display_str = format!("{}", err);
        assert!(display_str.contains("2024-01-01"));
        assert!(display_str.contains("2024-01-05"));
        assert_eq!(err.category(), "overlapping_leave");
    }
}
