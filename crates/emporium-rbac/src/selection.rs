//! Selection state of a role being edited.
//!
//! The model holds the set of selected permission ids and the set of ids
//! the loaded catalog knows about. Every mutation is clamped to the catalog,
//! so the selection can never contain an id the catalog does not have.
//!
//! Category checkboxes are tri-state. The state is derived on every query
//! from the selection and the category members; nothing is cached.

use std::collections::BTreeSet;

use emporium_types::PermissionId;
use serde::{Deserialize, Serialize};

use crate::catalog::PermissionCatalog;
use crate::grouping::PermissionCategory;

/// Checkbox state of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriState {
    /// Every member is selected.
    Full,
    /// Some, but not all, members are selected.
    Partial,
    /// No member is selected.
    Empty,
}

/// Selected permission ids for one editor session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    catalog_ids: BTreeSet<PermissionId>,
    selected: BTreeSet<PermissionId>,
}

impl SelectionModel {
    /// Creates an empty selection over a catalog.
    pub fn new(catalog: &PermissionCatalog) -> Self {
        Self {
            catalog_ids: catalog.all_ids(),
            selected: BTreeSet::new(),
        }
    }

    /// Creates a selection pre-populated with `ids`.
    ///
    /// Ids absent from the catalog are dropped.
    pub fn with_selected(
        catalog: &PermissionCatalog,
        ids: impl IntoIterator<Item = PermissionId>,
    ) -> Self {
        let mut model = Self::new(catalog);
        model.selected = ids
            .into_iter()
            .filter(|id| model.catalog_ids.contains(id))
            .collect();
        model
    }

    /// Flips membership of a single id. No-op for ids outside the catalog.
    pub fn toggle(&mut self, id: PermissionId) {
        if !self.catalog_ids.contains(&id) {
            return;
        }
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Selects (`checked`) or deselects every member of a category.
    ///
    /// Idempotent. Members outside the catalog are ignored.
    pub fn select_category(&mut self, category: &PermissionCategory, checked: bool) {
        if checked {
            let catalog_ids = &self.catalog_ids;
            self.selected.extend(
                category
                    .member_ids
                    .iter()
                    .filter(|id| catalog_ids.contains(id)),
            );
        } else {
            self.selected.retain(|id| !category.member_ids.contains(id));
        }

        debug_assert!(self.selected.is_subset(&self.catalog_ids));
    }

    /// Selects every permission in the catalog.
    pub fn select_all(&mut self) {
        self.selected.clone_from(&self.catalog_ids);
    }

    pub fn clear_all(&mut self) {
        self.selected.clear();
    }

    /// Derives the checkbox state of a category from the current selection.
    ///
    /// A category without members is [`TriState::Empty`].
    pub fn category_state(&self, category: &PermissionCategory) -> TriState {
        let selected_members = category
            .member_ids
            .iter()
            .filter(|id| self.selected.contains(id))
            .count();

        if selected_members == 0 {
            TriState::Empty
        } else if selected_members == category.member_ids.len() {
            TriState::Full
        } else {
            TriState::Partial
        }
    }

    pub fn is_selected(&self, id: PermissionId) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected_ids(&self) -> &BTreeSet<PermissionId> {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
