//! Effects produced by the editor kernel.
//!
//! Effects represent the work the host must perform after an event is
//! applied: fetching records, saving the role, surfacing warnings. The
//! kernel is pure - it produces effects but never executes them directly.
//! Every effect that expects a reply carries the session it belongs to; the
//! reply event must echo it back.

use emporium_types::{RoleId, RolePayload, SessionId};
use serde::{Deserialize, Serialize};

/// Whether a save creates a new role or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersistTarget {
    Create,
    Update(RoleId),
}

/// An effect to be executed by the host.
///
/// Produced by [`super::kernel::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Load the permission catalog. Reply with `Event::CatalogLoaded`.
    FetchCatalog { session: SessionId },

    /// Load the role being edited. Reply with `Event::RoleLoaded`.
    FetchRole { session: SessionId, role_id: RoleId },

    /// Save the role. Reply with `Event::Submitted`.
    PersistRole {
        session: SessionId,
        target: PersistTarget,
        payload: RolePayload,
    },

    /// Non-blocking warning: the role references permissions the catalog
    /// does not contain. They were left out of the selection.
    ReportUnresolved {
        session: SessionId,
        role_id: RoleId,
        names: Vec<String>,
    },
}

impl Effect {
    /// Returns the session this effect belongs to.
    pub fn session(&self) -> SessionId {
        match self {
            Effect::FetchCatalog { session }
            | Effect::FetchRole { session, .. }
            | Effect::PersistRole { session, .. }
            | Effect::ReportUnresolved { session, .. } => *session,
        }
    }
}
