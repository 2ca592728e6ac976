//! # emporium-rbac: Permission classification and role assignment
//!
//! The pure building blocks behind the role editor:
//! - **Classification** of permission names into an action category and a
//!   resource scope ([`classification`])
//! - **Catalog index** for id and name lookups ([`catalog`])
//! - **Grouping** of a catalog into bulk-selection categories ([`grouping`])
//! - **Selection model** with tri-state category checkboxes ([`selection`])
//! - **Name/id bridge** between backend role data and the editor ([`bridge`])
//! - **Validation** of role and permission forms ([`validation`])
//!
//! ## Data Flow
//!
//! ```text
//! ┌──────────────────────┐   build    ┌──────────────────────┐
//! │  Vec<Permission>     │──────────▶│  PermissionCatalog    │
//! └──────────────────────┘            └──────────┬───────────┘
//!                                                │
//!              ┌─────────────────────────────────┼──────────────────────┐
//!              ▼                                 ▼                      ▼
//! ┌──────────────────────┐      ┌──────────────────────┐  ┌──────────────────────┐
//! │  group()             │      │  names_to_ids()      │  │  ids_to_names()      │
//! │  Vec<Category>       │      │  Resolution          │  │  Vec<String>         │
//! └──────────┬───────────┘      └──────────┬───────────┘  └──────────▲───────────┘
//!            │                             │                         │
//!            ▼                             ▼                         │
//! ┌────────────────────────────────────────────────────────────────────┴──┐
//! │  SelectionModel: toggle / select_category / clear_all / category_state │
//! └───────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use emporium_rbac::{PermissionCatalog, SelectionModel, TriState, group, find_category, names_to_ids};
//! use emporium_types::Permission;
//!
//! let catalog = PermissionCatalog::build(vec![
//!     Permission::new(1, "view_users", "web"),
//!     Permission::new(2, "edit_users", "web"),
//!     Permission::new(3, "view_products", "web"),
//! ])?;
//!
//! let resolution = names_to_ids(&["view_users", "delete_users"], &catalog);
//! assert_eq!(resolution.unresolved, vec!["delete_users".to_string()]);
//!
//! let selection = SelectionModel::with_selected(&catalog, resolution.ids);
//! let categories = group(catalog.as_slice());
//! let view = find_category(&categories, "view").expect("view group");
//! assert_eq!(selection.category_state(view), TriState::Partial);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod bridge;
pub mod catalog;
pub mod classification;
pub mod grouping;
pub mod selection;
pub mod validation;

// Re-export commonly used types
pub use bridge::{Resolution, ids_to_names, names_to_ids};
pub use catalog::{CatalogError, PermissionCatalog};
pub use classification::{Action, Classification, Scope, classify, display_name};
pub use grouping::{PermissionCategory, find_category, group, group_by_scope, group_catalog};
pub use selection::{SelectionModel, TriState};
pub use validation::{
    Field, FieldError, FieldErrorKind, ValidationErrors, validate_permission, validate_role,
};
