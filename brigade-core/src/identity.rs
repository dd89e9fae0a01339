//! User identity and role model for permission checks
//!
//! Mutating personnel operations receive the acting user explicitly; the
//! manager evaluates the role predicates defined here rather than consulting
//! any process-wide session state.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Role held by a system user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    Owner,
    Organizer,
    Cook,
    Service,
}

impl Role {
    /// Stable name used in error messages and log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "Owner",
            Role::Organizer => "Organizer",
            Role::Cook => "Cook",
            Role::Service => "Service",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated system user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub roles: Vec<Role>,
}

impl User {
    /// Create a new user with validation
    pub fn new<S: Into<String>>(username: S, roles: Vec<Role>) -> Result<Self> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(Error::validation("Username cannot be empty"));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            username,
            roles,
        })
    }

    /// Check if the user holds a specific role
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Check if the user is an owner
    pub fn is_owner(&self) -> bool {
        self.has_role(Role::Owner)
    }

    /// Check if the user may organize; owners hold every organizer privilege
    pub fn is_organizer(&self) -> bool {
        self.has_role(Role::Organizer) || self.is_owner()
    }
}
