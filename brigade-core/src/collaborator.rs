//! Collaborator domain model and related types
//!
//! A collaborator is a staff member of the catering company, permanent or
//! occasional, tracked whether or not they hold a system login. The record
//! carries the vacation-day ledger consumed by leave approval and a
//! lifecycle status used for soft deletion.
//!
//! # Examples
//!
//! ```rust
//! use brigade_core::collaborator::*;
//!
//! let mut collaborator = Collaborator::new("Mario Rossi", "mario.rossi@example.com").unwrap();
//! assert!(collaborator.is_occasional());
//! assert_eq!(collaborator.vacation_days, 0);
//!
//! collaborator.promote();
//! collaborator.set_vacation_allowance(20);
//! assert!(!collaborator.is_occasional());
//! ```

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a staff member of the catering company
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Collaborator {
    pub id: Uuid,
    pub name: String,
    pub contact: String,
    pub fiscal_code: Option<String>,
    pub address: Option<String>,
    pub occasional: bool,
    pub status: CollaboratorStatus,
    pub vacation_days: u32,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle status of a collaborator record
///
/// Inactive records are excluded from default listings but keep all their
/// data; there is no reactivation path through the public contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CollaboratorStatus {
    Active,
    Inactive,
}

impl Collaborator {
    /// Create a new collaborator with validation
    ///
    /// New collaborators start occasional and active with an empty
    /// vacation-day ledger.
    pub fn new<S1: Into<String>, S2: Into<String>>(name: S1, contact: S2) -> Result<Self> {
        let name = name.into();
        let contact = contact.into();
        Self::validate_name(&name)?;
        Self::validate_contact(&contact)?;

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            contact,
            fiscal_code: None,
            address: None,
            occasional: true,
            status: CollaboratorStatus::Active,
            vacation_days: 0,
            user_id: None,
            created_at: Utc::now(),
        })
    }

    /// Create a builder for constructing a Collaborator
    pub fn builder() -> CollaboratorBuilder {
        CollaboratorBuilder::new()
    }

    /// Validate collaborator name
    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::validation("Collaborator name cannot be empty"));
        }
        Ok(())
    }

    /// Validate collaborator contact
    fn validate_contact(contact: &str) -> Result<()> {
        if contact.trim().is_empty() {
            return Err(Error::validation("Collaborator contact cannot be empty"));
        }
        Ok(())
    }

    /// Apply a partial update to the descriptive fields
    ///
    /// Only provided, non-blank values overwrite; absent or blank values
    /// leave the corresponding field untouched.
    pub fn apply_update(&mut self, update: &CollaboratorUpdate) {
        if let Some(name) = update.name.as_ref().filter(|v| !v.trim().is_empty()) {
            self.name = name.clone();
        }
        if let Some(fiscal_code) = update.fiscal_code.as_ref().filter(|v| !v.trim().is_empty()) {
            self.fiscal_code = Some(fiscal_code.clone());
        }
        if let Some(contact) = update.contact.as_ref().filter(|v| !v.trim().is_empty()) {
            self.contact = contact.clone();
        }
        if let Some(address) = update.address.as_ref().filter(|v| !v.trim().is_empty()) {
            self.address = Some(address.clone());
        }
    }

    /// Promote the collaborator to the permanent tier
    ///
    /// Idempotent; promoting an already-permanent collaborator is a no-op.
    /// There is no demotion path.
    pub fn promote(&mut self) {
        self.occasional = false;
    }

    /// Mark the record inactive
    ///
    /// Soft delete: every other field keeps its value. The future-commitment
    /// gate is enforced by the manager, which can consult the schedule.
    pub fn deactivate(&mut self) {
        self.status = CollaboratorStatus::Inactive;
    }

    /// Reduce the vacation-day balance by `days`
    ///
    /// Fails when the balance would go negative and leaves it unchanged.
    pub fn reduce_vacation_days(&mut self, days: u32) -> Result<()> {
        if days > self.vacation_days {
            return Err(Error::insufficient_balance(days, self.vacation_days));
        }
        self.vacation_days -= days;
        Ok(())
    }

    /// Add days to the vacation balance
    pub fn grant_vacation_days(&mut self, days: u32) {
        self.vacation_days = self.vacation_days.saturating_add(days);
    }

    /// Replace the vacation balance with a new yearly allowance
    pub fn set_vacation_allowance(&mut self, days: u32) {
        self.vacation_days = days;
    }

    /// Link the record to a system-user account
    pub fn link_user(&mut self, user_id: Uuid) {
        self.user_id = Some(user_id);
    }

    /// Check if the record is active
    pub fn is_active(&self) -> bool {
        matches!(self.status, CollaboratorStatus::Active)
    }

    /// Check if the collaborator is on the occasional tier
    pub fn is_occasional(&self) -> bool {
        self.occasional
    }

    /// Check if the collaborator may submit leave requests
    pub fn can_request_leave(&self) -> bool {
        self.is_active()
    }
}

/// Partial update for a collaborator's descriptive fields
///
/// Chainable setters mirror the optional arguments of the update operation;
/// fields left unset are not touched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CollaboratorUpdate {
    pub name: Option<String>,
    pub fiscal_code: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
}

impl CollaboratorUpdate {
    /// Create an empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the new name
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the new fiscal code
    pub fn fiscal_code<S: Into<String>>(mut self, fiscal_code: S) -> Self {
        self.fiscal_code = Some(fiscal_code.into());
        self
    }

    /// Set the new contact
    pub fn contact<S: Into<String>>(mut self, contact: S) -> Self {
        self.contact = Some(contact.into());
        self
    }

    /// Set the new address
    pub fn address<S: Into<String>>(mut self, address: S) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Check whether the update carries no effective change
    pub fn is_empty(&self) -> bool {
        let provided = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        !provided(&self.name)
            && !provided(&self.fiscal_code)
            && !provided(&self.contact)
            && !provided(&self.address)
    }
}

/// Builder for constructing Collaborator instances with validation
#[derive(Debug, Clone)]
pub struct CollaboratorBuilder {
    name: Option<String>,
    contact: Option<String>,
    fiscal_code: Option<String>,
    address: Option<String>,
    user_id: Option<Uuid>,
}

impl CollaboratorBuilder {
    /// Create a new collaborator builder
    pub fn new() -> Self {
        Self {
            name: None,
            contact: None,
            fiscal_code: None,
            address: None,
            user_id: None,
        }
    }

    /// Set the collaborator name
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the collaborator contact
    pub fn contact<S: Into<String>>(mut self, contact: S) -> Self {
        self.contact = Some(contact.into());
        self
    }

    /// Set the fiscal code
    pub fn fiscal_code<S: Into<String>>(mut self, fiscal_code: S) -> Self {
        self.fiscal_code = Some(fiscal_code.into());
        self
    }

    /// Set the address
    pub fn address<S: Into<String>>(mut self, address: S) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Link a system-user account
    pub fn user_id(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Build the Collaborator instance
    pub fn build(self) -> Result<Collaborator> {
        let name = self
            .name
            .ok_or_else(|| Error::validation("Collaborator name is required"))?;
        let contact = self
            .contact
            .ok_or_else(|| Error::validation("Collaborator contact is required"))?;

        let mut collaborator = Collaborator::new(name, contact)?;
        collaborator.fiscal_code = self.fiscal_code;
        collaborator.address = self.address;
        collaborator.user_id = self.user_id;
        Ok(collaborator)
    }
}

impl Default for CollaboratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
