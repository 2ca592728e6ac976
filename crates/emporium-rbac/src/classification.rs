//! Permission name classification.
//!
//! Derives an action category and a resource scope from a permission name
//! such as `edit_products`. Both are UI-local values: they are recomputed
//! from the name whenever needed and never sent to the backend.
//!
//! Matching is driven by two ordered tables, [`ACTION_TABLE`] and
//! [`SCOPE_TABLE`]. Their order is part of the contract: the scope table is
//! tested by substring containment and the first hit wins, so a name that
//! mentions several resources (`view_user_roles`) resolves to whichever
//! resource appears first in the table.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Separator between the segments of a permission name.
pub const SEGMENT_SEPARATOR: char = '_';

/// Key used for names that carry no recognizable action or resource.
pub const GENERAL: &str = "general";

/// Action category derived from the first segment of a permission name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// `view_*`
    Read,
    /// `create_*`, `edit_*`, `update_*`
    Write,
    /// `delete_*`
    Delete,
    /// `manage_*`, `admin_*`
    Admin,
    /// Anything else.
    General,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Write => "write",
            Action::Delete => "delete",
            Action::Admin => "admin",
            Action::General => GENERAL,
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource scope derived from the segments after the action prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Users,
    Roles,
    Permissions,
    Products,
    Orders,
    Categories,
    Content,
    Settings,
    General,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Users => "users",
            Scope::Roles => "roles",
            Scope::Permissions => "permissions",
            Scope::Products => "products",
            Scope::Orders => "orders",
            Scope::Categories => "categories",
            Scope::Content => "content",
            Scope::Settings => "settings",
            Scope::General => GENERAL,
        }
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action prefixes, matched exactly against the first name segment.
pub const ACTION_TABLE: &[(&str, Action)] = &[
    ("view", Action::Read),
    ("create", Action::Write),
    ("edit", Action::Write),
    ("update", Action::Write),
    ("delete", Action::Delete),
    ("manage", Action::Admin),
    ("admin", Action::Admin),
];

/// Resource markers, tested in order by substring containment.
///
/// `permission` is listed after `role`, so `edit_role_permissions` is a
/// roles permission. Do not reorder without updating callers that rely on it.
pub const SCOPE_TABLE: &[(&str, Scope)] = &[
    ("user", Scope::Users),
    ("role", Scope::Roles),
    ("permission", Scope::Permissions),
    ("product", Scope::Products),
    ("order", Scope::Orders),
    ("category", Scope::Categories),
    ("content", Scope::Content),
    ("setting", Scope::Settings),
];

/// Category and scope of a permission name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Classification {
    pub category: Action,
    pub scope: Scope,
}

impl Classification {
    /// The fallback for names without structure.
    pub const GENERAL: Classification = Classification {
        category: Action::General,
        scope: Scope::General,
    };
}

/// Classifies a permission name into an action category and a scope.
///
/// Total: every input, including the empty string, yields a result.
///
/// # Examples
///
/// ```
/// use emporium_rbac::classification::{Action, Scope, classify};
///
/// let c = classify("view_products");
/// assert_eq!((c.category, c.scope), (Action::Read, Scope::Products));
///
/// let c = classify("manage_settings");
/// assert_eq!((c.category, c.scope), (Action::Admin, Scope::Settings));
///
/// let c = classify("foo");
/// assert_eq!((c.category, c.scope), (Action::General, Scope::General));
/// ```
pub fn classify(name: &str) -> Classification {
    let Some((prefix, rest)) = name.split_once(SEGMENT_SEPARATOR) else {
        return Classification::GENERAL;
    };

    Classification {
        category: action_for(prefix),
        scope: scope_for(rest),
    }
}

/// Looks up the action for a raw prefix, falling back to [`Action::General`].
pub fn action_for(prefix: &str) -> Action {
    ACTION_TABLE
        .iter()
        .find(|(key, _)| *key == prefix)
        .map_or(Action::General, |(_, action)| *action)
}

/// Probes the resource table against the remainder of a name.
pub fn scope_for(rest: &str) -> Scope {
    SCOPE_TABLE
        .iter()
        .find(|(marker, _)| rest.contains(marker))
        .map_or(Scope::General, |(_, scope)| *scope)
}

/// Returns the grouping key of a permission name.
///
/// This is the raw action prefix (`view`, `edit`, `update`, ...) when it is
/// a known action, otherwise [`GENERAL`]. Two prefixes mapping to the same
/// [`Action`] (`edit` and `update`) stay in separate groups.
pub fn action_prefix(name: &str) -> &str {
    match name.split_once(SEGMENT_SEPARATOR) {
        Some((prefix, _)) if action_for(prefix) != Action::General => prefix,
        _ => GENERAL,
    }
}

/// Returns a human readable label for a permission name.
///
/// Every underscore separated segment is title-cased: `edit_user_roles`
/// becomes `Edit User Roles`. Empty segments are skipped.
pub fn display_name(name: &str) -> String {
    name.split(SEGMENT_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
