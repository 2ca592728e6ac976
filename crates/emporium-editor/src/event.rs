//! Events fed into the editor kernel.
//!
//! Events come from two places: the admin interacting with the editor, and
//! the host delivering the result of an effect. Result events carry the
//! session of the effect that triggered them.

use emporium_types::{FetchError, Permission, PermissionId, Role, RoleId, SessionId};

/// What the editor was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// A new role; no role is fetched.
    Create,
    /// An existing role, fetched after the catalog.
    Edit(RoleId),
}

/// An input to [`super::kernel::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // ========================================================================
    // Lifecycle
    // ========================================================================
    /// The editor was opened. Starts a new session.
    Open(EditorMode),

    /// The editor was closed. Any in-flight result becomes stale.
    Close,

    /// Re-enter the stage that failed.
    Retry,

    // ========================================================================
    // Collaborator Results
    // ========================================================================
    CatalogLoaded {
        session: SessionId,
        result: Result<Vec<Permission>, FetchError>,
    },

    RoleLoaded {
        session: SessionId,
        result: Result<Role, FetchError>,
    },

    /// The save finished. On success carries the role as stored.
    Submitted {
        session: SessionId,
        result: Result<Role, FetchError>,
    },

    // ========================================================================
    // Editing (Ready only)
    // ========================================================================
    Toggle(PermissionId),

    /// Checks or unchecks a whole category, identified by its key.
    SelectCategory {
        key: String,
        checked: bool,
    },

    SelectAll,

    ClearAll,

    SetName(String),

    SetGuardName(String),

    Submit,
}

impl Event {
    /// Short name used in logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Open(_) => "open",
            Event::Close => "close",
            Event::Retry => "retry",
            Event::CatalogLoaded { .. } => "catalog_loaded",
            Event::RoleLoaded { .. } => "role_loaded",
            Event::Submitted { .. } => "submitted",
            Event::Toggle(_) => "toggle",
            Event::SelectCategory { .. } => "select_category",
            Event::SelectAll => "select_all",
            Event::ClearAll => "clear_all",
            Event::SetName(_) => "set_name",
            Event::SetGuardName(_) => "set_guard_name",
            Event::Submit => "submit",
        }
    }
}
