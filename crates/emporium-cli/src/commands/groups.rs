//! Show how a catalog is grouped into categories.

use std::path::Path;

use anyhow::{Context, Result};
use emporium_rbac::{PermissionCatalog, PermissionCategory, group_by_scope, group_catalog};
use emporium_types::Permission;
use serde::Serialize;

use super::{OutputFormat, print_json, read_json};
use crate::style::print_table;

#[derive(Debug, Serialize)]
struct CategoryReport {
    key: String,
    display_name: String,
    permissions: Vec<String>,
}

impl CategoryReport {
    fn new(category: &PermissionCategory, catalog: &PermissionCatalog) -> Self {
        let permissions = catalog
            .iter()
            .filter(|p| category.contains(p.id))
            .map(|p| p.name.clone())
            .collect();
        Self {
            key: category.key.clone(),
            display_name: category.display_name.clone(),
            permissions,
        }
    }
}

/// Loads a catalog file (a JSON array of permissions).
pub fn load_catalog(path: &Path) -> Result<PermissionCatalog> {
    let permissions: Vec<Permission> = read_json(path)?;
    PermissionCatalog::build(permissions)
        .with_context(|| format!("Malformed permission catalog in {}", path.display()))
}

pub fn run(catalog_path: &Path, by_scope: bool, format: OutputFormat) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let categories = if by_scope {
        group_by_scope(catalog.as_slice())
    } else {
        group_catalog(&catalog)
    };

    let reports: Vec<CategoryReport> = categories
        .iter()
        .map(|category| CategoryReport::new(category, &catalog))
        .collect();

    match format {
        OutputFormat::Json => print_json(&reports),
        OutputFormat::Text => {
            let rows: Vec<Vec<String>> = reports
                .iter()
                .map(|r| {
                    vec![
                        r.display_name.clone(),
                        r.key.clone(),
                        r.permissions.len().to_string(),
                        r.permissions.join(", "),
                    ]
                })
                .collect();
            print_table(
                &["Category", "Key", "Count", "Permissions"],
                &rows,
                ("category", "categories"),
            );
            Ok(())
        }
    }
}
