// Rust guideline compliant 2026-10-16

//! Identity context for a single request.
//!
//! An [`Identity`] is produced by the external authentication collaborator
//! once per request and is never mutated afterwards. Role membership is a
//! set; the policy always applies the most privileged rule the set grants.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Platform role held by a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Ordinary member.
    User,
    /// Moderator with platform-wide rights.
    Admin,
}

impl Role {
    /// Returns the wire form of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(Error::InvalidInput(format!("Invalid role: {other}"))),
        }
    }
}

/// The authenticated actor executing a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque user identifier.
    pub id: String,
    /// Roles currently held.
    #[serde(default)]
    pub roles: BTreeSet<Role>,
    /// Whether the member passed the signup approval gate.
    #[serde(default)]
    pub is_approved: bool,
}

impl Identity {
    /// Creates an unapproved identity with no roles.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            roles: BTreeSet::new(),
            is_approved: false,
        }
    }

    /// Returns a copy of this identity holding `role` as well.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }

    /// Returns a copy of this identity with the given approval flag.
    #[must_use]
    pub fn approved(mut self, is_approved: bool) -> Self {
        self.is_approved = is_approved;
        self
    }

    /// Returns `true` if the identity holds `role`.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Returns `true` if the identity holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Returns `true` if `user_id` refers to this identity.
    #[must_use]
    pub fn is(&self, user_id: &str) -> bool {
        self.id == user_id
    }
}

/// Resolves the identity attached to a request.
///
/// # Errors
///
/// Returns [`Error::Unauthenticated`] when no identity was resolved or its id
/// is blank.
pub fn require_identity(identity: Option<&Identity>) -> Result<&Identity> {
    match identity {
        Some(identity) if !identity.id.trim().is_empty() => Ok(identity),
        _ => Err(Error::Unauthenticated),
    }
}
