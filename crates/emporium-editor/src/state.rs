//! Editor state.
//!
//! One [`EditorState`] exists per editor. It tracks the current session,
//! the lifecycle [`Phase`], the form fields, and - once the catalog has
//! loaded - the indexed catalog, its categories and the selection.
//!
//! The catalog and categories sit behind `Arc` so that cloning the state
//! for a transition does not copy them.

use std::sync::Arc;

use emporium_rbac::{
    CatalogError, PermissionCatalog, PermissionCategory, SelectionModel, TriState,
    ValidationErrors, find_category,
};
use emporium_types::{FetchError, Role, RoleId, SessionId};
use serde::{Deserialize, Serialize};

use crate::event::EditorMode;

// ============================================================================
// Settings
// ============================================================================

/// How the editor reacts to role permissions missing from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnresolvedPolicy {
    /// Drop them from the selection and report a warning.
    #[default]
    Warn,
    /// Refuse to open the role for editing.
    Reject,
}

/// Behaviour knobs of the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Guard pre-filled when creating a role.
    pub default_guard_name: String,
    pub unresolved_policy: UnresolvedPolicy,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            default_guard_name: "web".to_string(),
            unresolved_policy: UnresolvedPolicy::Warn,
        }
    }
}

// ============================================================================
// Phase
// ============================================================================

/// The fetch stage a failure came from. [`crate::Event::Retry`] re-enters it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Catalog,
    Role,
    Submit,
}

/// Why the editor failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureCause {
    /// A collaborator call failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The catalog contained duplicate ids.
    #[error("malformed permission catalog: {0}")]
    MalformedCatalog(#[from] CatalogError),

    /// The role references permissions absent from the catalog and the
    /// editor is configured to reject such roles.
    #[error("role references unknown permissions: {}", .0.join(", "))]
    UnresolvedPermissions(Vec<String>),
}

impl FailureCause {
    /// A malformed catalog is upstream corruption; retrying cannot help.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, FailureCause::MalformedCatalog(_))
    }
}

/// Lifecycle of the editor.
///
/// `Idle → LoadingCatalog → LoadingRole (edit only) → Ready → Submitting → Done | Failed`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    LoadingCatalog,
    LoadingRole { role_id: RoleId },
    Ready,
    Submitting,
    /// The role was saved; carries the stored record.
    Done { role: Role },
    Failed { stage: Stage, cause: FailureCause },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::LoadingCatalog => "loading_catalog",
            Phase::LoadingRole { .. } => "loading_role",
            Phase::Ready => "ready",
            Phase::Submitting => "submitting",
            Phase::Done { .. } => "done",
            Phase::Failed { .. } => "failed",
        }
    }
}

// ============================================================================
// Form and Workspace
// ============================================================================

/// Role form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleForm {
    pub name: String,
    pub guard_name: String,
}

/// Everything derived from a loaded catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    catalog: Arc<PermissionCatalog>,
    categories: Arc<[PermissionCategory]>,
    selection: SelectionModel,
}

impl Workspace {
    pub(crate) fn new(catalog: PermissionCatalog) -> Self {
        let categories = emporium_rbac::group_catalog(&catalog);
        let selection = SelectionModel::new(&catalog);
        Self {
            catalog: Arc::new(catalog),
            categories: categories.into(),
            selection,
        }
    }

    pub fn catalog(&self) -> &PermissionCatalog {
        &self.catalog
    }

    pub fn categories(&self) -> &[PermissionCategory] {
        &self.categories
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub(crate) fn selection_mut(&mut self) -> &mut SelectionModel {
        &mut self.selection
    }

    pub(crate) fn replace_selection(&mut self, selection: SelectionModel) {
        self.selection = selection;
    }

    pub fn category(&self, key: &str) -> Option<&PermissionCategory> {
        find_category(&self.categories, key)
    }

    /// Tri-state of every category, in display order.
    pub fn category_states(&self) -> Vec<(&PermissionCategory, TriState)> {
        self.categories
            .iter()
            .map(|category| (category, self.selection.category_state(category)))
            .collect()
    }
}

// ============================================================================
// Editor State
// ============================================================================

/// The editor's state.
///
/// Transitions go through [`crate::kernel::apply`], which takes ownership
/// and returns the next state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub(crate) session: SessionId,
    pub(crate) mode: EditorMode,
    pub(crate) phase: Phase,
    pub(crate) form: RoleForm,
    pub(crate) workspace: Option<Workspace>,
    pub(crate) errors: ValidationErrors,
    pub(crate) unresolved: Vec<String>,
    pub(crate) settings: EditorSettings,
}

impl EditorState {
    /// Creates an idle editor.
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            session: SessionId::default(),
            mode: EditorMode::Create,
            phase: Phase::Idle,
            form: RoleForm::default(),
            workspace: None,
            errors: ValidationErrors::default(),
            unresolved: Vec::new(),
            settings,
        }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn form(&self) -> &RoleForm {
        &self.form
    }

    /// Present once the catalog has loaded, until the editor closes or saves.
    pub fn workspace(&self) -> Option<&Workspace> {
        self.workspace.as_ref()
    }

    /// Field errors from the last rejected submit.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Permission names of the loaded role that the catalog lacks.
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// Resets everything owned by a session. Settings and session survive.
    pub(crate) fn reset_session_data(&mut self) {
        self.form = RoleForm::default();
        self.workspace = None;
        self.errors = ValidationErrors::default();
        self.unresolved.clear();
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}
