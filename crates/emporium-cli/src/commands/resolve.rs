//! Open a role against a catalog and show the resulting selection.
//!
//! Drives the same editor lifecycle a UI would, backed by the two files.

use std::path::Path;

use anyhow::{Context, Result, bail};
use emporium_editor::{
    EditorMode, EditorSettings, Event, InMemoryBackend, LogNotifier, Phase, Runtime,
};
use emporium_rbac::{TriState, ids_to_names};
use emporium_types::{Permission, Role};
use serde::Serialize;

use super::{OutputFormat, print_json, read_json};
use crate::style::colors::tri_state_marker;
use crate::style::{print_header, print_labeled, print_spacer, print_table, print_warn};

#[derive(Debug, Serialize)]
struct CategoryReport {
    key: String,
    display_name: String,
    state: TriState,
    selected: usize,
    total: usize,
}

#[derive(Debug, Serialize)]
struct ResolveReport {
    role: String,
    guard_name: String,
    selected: Vec<String>,
    unresolved: Vec<String>,
    categories: Vec<CategoryReport>,
}

pub fn run(
    catalog_path: &Path,
    role_path: &Path,
    settings: EditorSettings,
    format: OutputFormat,
) -> Result<()> {
    let permissions: Vec<Permission> = read_json(catalog_path)?;
    let role: Role = read_json(role_path)?;
    let role_id = role.id;

    let backend = InMemoryBackend::new(permissions).with_role(role);
    let mut runtime = Runtime::with_settings(backend, LogNotifier, settings);
    runtime
        .dispatch(Event::Open(EditorMode::Edit(role_id)))
        .context("Failed to open role")?;

    let state = runtime.state();
    let workspace = match (state.phase(), state.workspace()) {
        (Phase::Ready, Some(workspace)) => workspace,
        (Phase::Failed { stage, cause }, _) => {
            bail!("Could not open role {role_id} ({stage:?} stage): {cause}")
        }
        (phase, _) => bail!("Editor stopped in unexpected phase '{}'", phase.name()),
    };

    let selection = workspace.selection();
    let report = ResolveReport {
        role: state.form().name.clone(),
        guard_name: state.form().guard_name.clone(),
        selected: ids_to_names(selection.selected_ids(), workspace.catalog()),
        unresolved: state.unresolved().to_vec(),
        categories: workspace
            .category_states()
            .into_iter()
            .map(|(category, tri)| CategoryReport {
                key: category.key.clone(),
                display_name: category.display_name.clone(),
                state: tri,
                selected: category
                    .member_ids
                    .iter()
                    .filter(|id| selection.is_selected(**id))
                    .count(),
                total: category.len(),
            })
            .collect(),
    };

    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            print_text(&report);
            Ok(())
        }
    }
}

fn print_text(report: &ResolveReport) {
    print_header(&format!("Role {}", report.role));
    print_labeled("Guard", &report.guard_name);
    print_labeled("Selected", &report.selected.len().to_string());
    print_spacer();

    let rows: Vec<Vec<String>> = report
        .categories
        .iter()
        .map(|c| {
            vec![
                tri_state_marker(c.state),
                c.display_name.clone(),
                format!("{}/{}", c.selected, c.total),
            ]
        })
        .collect();
    print_table(&["", "Category", "Selected"], &rows, ("category", "categories"));

    if !report.unresolved.is_empty() {
        print_spacer();
        print_warn(&format!(
            "Not in the catalog, left unselected: {}",
            report.unresolved.join(", ")
        ));
    }
}
