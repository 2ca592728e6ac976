//! # emporium-types: Core types for `Emporium`
//!
//! This crate contains the records exchanged between the role editor and
//! the back office API:
//! - Entity IDs ([`PermissionId`], [`RoleId`], [`SessionId`])
//! - Backend records ([`Permission`], [`Role`])
//! - Persistence payloads ([`RolePayload`], [`PermissionPayload`])
//! - Collaborator failures ([`FetchError`])
//!
//! Field names follow the backend's snake_case convention; the camelCase
//! spellings used by the storefront client are accepted on input.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

// ============================================================================
// Entity IDs - All Copy (cheap 8-byte values)
// ============================================================================

/// Durable backend identifier of a permission.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct PermissionId(u64);

impl PermissionId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl Display for PermissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PermissionId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<PermissionId> for u64 {
    fn from(id: PermissionId) -> Self {
        id.0
    }
}

/// Durable backend identifier of a role.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct RoleId(u64);

impl RoleId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RoleId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<RoleId> for u64 {
    fn from(id: RoleId) -> Self {
        id.0
    }
}

/// Identity of one role editor session.
///
/// Every time the editor opens, a fresh session is allocated. Responses
/// tagged with an older session belong to a closed editor and are dropped.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct SessionId(u64);

impl SessionId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the session that follows this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

// ============================================================================
// Backend Records
// ============================================================================

/// An atomic, named capability (e.g. `edit_products`) assignable to roles.
///
/// The name is immutable once created. Category and scope are derived from
/// it on the client and never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    pub id: PermissionId,
    pub name: String,
    #[serde(alias = "guardName")]
    pub guard_name: String,
}

impl Permission {
    pub fn new(id: u64, name: impl Into<String>, guard_name: impl Into<String>) -> Self {
        Self {
            id: PermissionId::new(id),
            name: name.into(),
            guard_name: guard_name.into(),
        }
    }
}

/// A named bundle of permissions, as received from the backend.
///
/// The backend refers to permissions by name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    #[serde(alias = "guardName")]
    pub guard_name: String,
    #[serde(default, alias = "permissionNames")]
    pub permission_names: Vec<String>,
}

// ============================================================================
// Persistence Payloads
// ============================================================================

/// Body of a create/update role request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePayload {
    pub name: String,
    pub guard_name: String,
    pub permission_names: Vec<String>,
}

/// Body of a create/update permission request.
///
/// Only the name and guard travel to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionPayload {
    pub name: String,
    pub guard_name: String,
}

impl From<&Permission> for PermissionPayload {
    fn from(permission: &Permission) -> Self {
        Self {
            name: permission.name.clone(),
            guard_name: permission.guard_name.clone(),
        }
    }
}

// ============================================================================
// Collaborator Failures
// ============================================================================

/// Error returned by the data layer when a fetch or save fails.
///
/// Transport details stay inside the collaborator; the editor only needs
/// enough to show the failure and offer a retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchError {
    /// The backend could not be reached or timed out.
    Unavailable(String),
    /// The requested record does not exist.
    NotFound(String),
    /// The backend refused the request (validation, conflict, ...).
    Rejected(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "backend unavailable: {reason}"),
            Self::NotFound(what) => write!(f, "not found: {what}"),
            Self::Rejected(reason) => write!(f, "request rejected: {reason}"),
        }
    }
}

impl std::error::Error for FetchError {}
