//! Core domain models and ports for the Brigade personnel system
//!
//! This crate contains the staff-lifecycle and leave-accounting engine of
//! the catering operation: the collaborator record and its status
//! invariants, the leave-request approval workflow with its vacation-day
//! ledger, the immutable performance history, and the role-gated manager
//! that sequences mutations and announces them to the persistence boundary.

pub mod collaborator;
pub mod error;
pub mod events;
pub mod identity;
pub mod leave;
pub mod manager;
pub mod performance;
pub mod schedule;
pub mod store;

pub use error::{Error, Result};

pub use collaborator::{Collaborator, CollaboratorStatus, CollaboratorUpdate};
pub use events::PersonnelEventReceiver;
pub use identity::{Role, User};
pub use leave::{LeaveRequest, LeaveStatus};
pub use manager::{LeaveDecision, PersonnelManager};
pub use performance::PerformanceNote;
pub use schedule::AssignmentCalendar;
pub use store::PersonnelStore;
