//! Collaborator traits the runtime executes effects against.
//!
//! The data layer (REST client, cache, fixture) implements
//! [`PermissionSource`] and [`RoleStore`]; the notification layer
//! implements [`Notifier`]. Transport mechanics, timeouts and retries stay
//! inside the implementations.

use emporium_types::{FetchError, Permission, Role, RoleId, RolePayload};

/// Read side of the back office API.
pub trait PermissionSource {
    /// Fetches the full permission catalog.
    fn fetch_catalog(&mut self) -> Result<Vec<Permission>, FetchError>;

    /// Fetches one role, with its permissions by name.
    fn fetch_role(&mut self, role_id: RoleId) -> Result<Role, FetchError>;
}

/// Write side of the back office API for roles.
pub trait RoleStore {
    fn create_role(&mut self, payload: RolePayload) -> Result<Role, FetchError>;

    fn update_role(&mut self, role_id: RoleId, payload: RolePayload) -> Result<Role, FetchError>;
}

/// Surfaces non-blocking warnings to the operator.
pub trait Notifier {
    /// A role references permissions that are not in the catalog.
    fn unresolved_permissions(&mut self, role_id: RoleId, names: &[String]);
}
