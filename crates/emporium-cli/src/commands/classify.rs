//! Classify permission names.

use anyhow::Result;
use emporium_rbac::classification::action_prefix;
use emporium_rbac::{Action, Scope, classify};
use serde::Serialize;

use super::{OutputFormat, print_json};
use crate::style::print_table;

#[derive(Debug, Serialize)]
struct ClassifiedName<'a> {
    name: &'a str,
    category: Action,
    scope: Scope,
    /// Key of the category the editor files this name under.
    group: &'a str,
}

pub fn run(names: &[String], format: OutputFormat) -> Result<()> {
    let classified: Vec<ClassifiedName<'_>> = names
        .iter()
        .map(|name| {
            let classification = classify(name);
            ClassifiedName {
                name,
                category: classification.category,
                scope: classification.scope,
                group: action_prefix(name),
            }
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&classified),
        OutputFormat::Text => {
            let rows: Vec<Vec<String>> = classified
                .iter()
                .map(|c| {
                    vec![
                        c.name.to_string(),
                        c.category.to_string(),
                        c.scope.to_string(),
                        c.group.to_string(),
                    ]
                })
                .collect();
            print_table(
                &["Permission", "Category", "Scope", "Group"],
                &rows,
                ("permission", "permissions"),
            );
            Ok(())
        }
    }
}
