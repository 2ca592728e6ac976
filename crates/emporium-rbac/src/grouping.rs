//! Category grouping.
//!
//! Partitions a permission catalog into the groups shown as bulk-selection
//! checkboxes. The primary axis is the action prefix (`view`, `edit`, ...);
//! the resource scope is available as a secondary axis.
//!
//! Groups come out in first-seen order of their key across the catalog.
//! There is no alphabetical resort, so the same catalog always renders the
//! same way.

use std::collections::BTreeSet;

use emporium_types::{Permission, PermissionId};
use serde::{Deserialize, Serialize};

use crate::catalog::PermissionCatalog;
use crate::classification::{action_prefix, classify, display_name};

/// A derived group of permissions.
///
/// Recomputed whenever the catalog changes; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionCategory {
    /// Grouping key (`view`, `edit`, `general`, or a scope name).
    pub key: String,
    /// Title-cased label for the key.
    pub display_name: String,
    pub member_ids: BTreeSet<PermissionId>,
}

impl PermissionCategory {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            display_name: display_name(key),
            member_ids: BTreeSet::new(),
        }
    }

    pub fn contains(&self, id: PermissionId) -> bool {
        self.member_ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.member_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.member_ids.is_empty()
    }
}

/// Groups permissions by action prefix, in first-seen order.
pub fn group(catalog: &[Permission]) -> Vec<PermissionCategory> {
    group_by_key(catalog, |permission| action_prefix(&permission.name).to_string())
}

/// Groups an indexed catalog by action prefix.
pub fn group_catalog(catalog: &PermissionCatalog) -> Vec<PermissionCategory> {
    group(catalog.as_slice())
}

/// Groups permissions by resource scope, in first-seen order.
pub fn group_by_scope(catalog: &[Permission]) -> Vec<PermissionCategory> {
    group_by_key(catalog, |permission| {
        classify(&permission.name).scope.as_str().to_string()
    })
}

/// Finds a category by key.
pub fn find_category<'a>(
    categories: &'a [PermissionCategory],
    key: &str,
) -> Option<&'a PermissionCategory> {
    categories.iter().find(|category| category.key == key)
}

fn group_by_key<F>(catalog: &[Permission], key_of: F) -> Vec<PermissionCategory>
where
    F: Fn(&Permission) -> String,
{
    let mut categories: Vec<PermissionCategory> = Vec::new();

    for permission in catalog {
        let key = key_of(permission);
        // Linear scan keeps first-seen order; the number of groups is tiny.
        let position = match categories.iter().position(|c| c.key == key) {
            Some(position) => position,
            None => {
                categories.push(PermissionCategory::new(&key));
                categories.len() - 1
            }
        };
        categories[position].member_ids.insert(permission.id);
    }

    categories
}
