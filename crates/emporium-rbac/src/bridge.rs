//! Conversion between permission names and catalog ids.
//!
//! The backend stores role permissions by name; the editor works on ids.
//! Loading resolves names to ids and keeps going past names the catalog
//! does not know, collecting them so the caller can report drift. Saving
//! maps ids back to names and drops any id the current catalog lacks, so an
//! unknown id is never submitted.

use std::collections::{BTreeSet, HashSet};

use emporium_types::PermissionId;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::PermissionCatalog;

/// Outcome of resolving a role's permission names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Ids of the names found in the catalog.
    pub ids: BTreeSet<PermissionId>,
    /// Names absent from the catalog, in input order, without repeats.
    pub unresolved: Vec<String>,
}

impl Resolution {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Resolves permission names to catalog ids.
///
/// Unknown names are skipped and collected in [`Resolution::unresolved`].
pub fn names_to_ids<S: AsRef<str>>(names: &[S], catalog: &PermissionCatalog) -> Resolution {
    let mut resolution = Resolution::default();

    for name in names {
        let name = name.as_ref();
        match catalog.find_by_name(name) {
            Some(permission) => {
                resolution.ids.insert(permission.id);
            }
            None => {
                if !resolution.unresolved.iter().any(|n| n == name) {
                    resolution.unresolved.push(name.to_string());
                }
            }
        }
    }

    if !resolution.is_complete() {
        warn!(
            unresolved = ?resolution.unresolved,
            resolved = resolution.ids.len(),
            "Permission names missing from catalog"
        );
    }

    resolution
}

/// Maps selected ids back to permission names, in catalog order.
///
/// Ids the catalog does not contain are dropped. A name shared by several
/// selected ids is emitted once, at its first position.
pub fn ids_to_names(ids: &BTreeSet<PermissionId>, catalog: &PermissionCatalog) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(ids.len());
    let names: Vec<String> = catalog
        .iter()
        .filter(|permission| ids.contains(&permission.id))
        .filter(|permission| seen.insert(permission.name.as_str()))
        .map(|permission| permission.name.clone())
        .collect();

    let dropped: Vec<&PermissionId> = ids.iter().filter(|id| !catalog.contains(**id)).collect();
    if !dropped.is_empty() {
        debug!(dropped = ?dropped, "Dropping ids absent from catalog");
    }

    names
}
