//! Permission catalog index.
//!
//! A [`PermissionCatalog`] is built once per loaded permission list and
//! answers lookups by id and by name. It also remembers the order in which
//! the backend returned the permissions, which drives every ordered output
//! derived from it (groups, submitted names).

use std::collections::{BTreeSet, HashMap};

use emporium_types::{Permission, PermissionId};
use thiserror::Error;
use tracing::{error, warn};

/// Error raised while indexing a permission list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two permissions share an id. The list is corrupt upstream.
    #[error("duplicate permission id {id}: '{first}' and '{second}'")]
    DuplicateIdentifier {
        id: PermissionId,
        first: String,
        second: String,
    },
}

/// Index of a permission list by id and by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionCatalog {
    permissions: Vec<Permission>,
    by_id: HashMap<PermissionId, usize>,
    by_name: HashMap<String, usize>,
}

impl PermissionCatalog {
    /// Indexes a permission list, preserving its order.
    ///
    /// Fails if two permissions share an id. When two permissions share a
    /// name (possible across guards), name lookups resolve to the first one.
    pub fn build(permissions: Vec<Permission>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(permissions.len());
        let mut by_name = HashMap::with_capacity(permissions.len());

        for (position, permission) in permissions.iter().enumerate() {
            if let Some(&earlier) = by_id.get(&permission.id) {
                let first: &Permission = &permissions[earlier];
                error!(
                    id = %permission.id,
                    first = %first.name,
                    second = %permission.name,
                    "Duplicate permission id in catalog"
                );
                return Err(CatalogError::DuplicateIdentifier {
                    id: permission.id,
                    first: first.name.clone(),
                    second: permission.name.clone(),
                });
            }
            by_id.insert(permission.id, position);

            if by_name.contains_key(&permission.name) {
                warn!(
                    id = %permission.id,
                    name = %permission.name,
                    guard = %permission.guard_name,
                    "Duplicate permission name, keeping first occurrence for lookups"
                );
            } else {
                by_name.insert(permission.name.clone(), position);
            }
        }

        // Postcondition: every permission is reachable by id
        debug_assert_eq!(by_id.len(), permissions.len());

        Ok(Self {
            permissions,
            by_id,
            by_name,
        })
    }

    /// Returns the permission with the given id, if present.
    pub fn find_by_id(&self, id: PermissionId) -> Option<&Permission> {
        self.by_id.get(&id).map(|&position| &self.permissions[position])
    }

    /// Returns the permission with the given name, if present.
    pub fn find_by_name(&self, name: &str) -> Option<&Permission> {
        self.by_name
            .get(name)
            .map(|&position| &self.permissions[position])
    }

    pub fn contains(&self, id: PermissionId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Returns every id in the catalog.
    pub fn all_ids(&self) -> BTreeSet<PermissionId> {
        self.permissions.iter().map(|p| p.id).collect()
    }

    /// Iterates permissions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.permissions.iter()
    }

    pub fn as_slice(&self) -> &[Permission] {
        &self.permissions
    }

    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}
