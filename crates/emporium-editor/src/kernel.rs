//! The kernel - pure functional core of the role editor.
//!
//! The kernel applies events to produce a new state and effects. It does
//! no IO: fetching and saving are described as [`Effect`]s for the host to
//! execute, and their outcomes come back as events.
//!
//! # Ordering
//!
//! Permission names can only be resolved to ids once the catalog is
//! indexed. The kernel enforces this by only requesting the role after
//! `CatalogLoaded` succeeds, and by refusing to resolve a role without a
//! catalog.
//!
//! # Stale responses
//!
//! Result events whose session is not the current one, or that arrive in a
//! phase not waiting for them, are dropped: the state is returned unchanged
//! and no effects are produced.
//!
//! # Example
//!
//! ```
//! use emporium_editor::{Effect, EditorMode, EditorState, Event, apply};
//!
//! let state = EditorState::default();
//! let (state, effects) = apply(state, Event::Open(EditorMode::Create))?;
//! assert_eq!(effects, vec![Effect::FetchCatalog { session: state.session() }]);
//! # Ok::<(), emporium_editor::EditorError>(())
//! ```

use emporium_rbac::{
    Field, PermissionCatalog, SelectionModel, ValidationErrors, ids_to_names, names_to_ids,
    validate_role,
};
use emporium_types::{FetchError, Permission, Role, RolePayload, SessionId};
use tracing::{debug, warn};

use crate::effects::{Effect, PersistTarget};
use crate::event::{EditorMode, Event};
use crate::state::{EditorState, FailureCause, Phase, Stage, UnresolvedPolicy, Workspace};

/// Applies an event to the state, producing the next state and effects.
///
/// Takes ownership of state, returns new state. On error the event was
/// not applicable in the current phase.
pub fn apply(
    mut state: EditorState,
    event: Event,
) -> Result<(EditorState, Vec<Effect>), EditorError> {
    let mut effects = Vec::new();

    match event {
        // ====================================================================
        // Lifecycle
        // ====================================================================
        Event::Open(mode) => {
            state.session = state.session.next();
            state.mode = mode;
            state.reset_session_data();
            if mode == EditorMode::Create {
                state.form.guard_name.clone_from(&state.settings.default_guard_name);
            }
            state.phase = Phase::LoadingCatalog;

            effects.push(Effect::FetchCatalog {
                session: state.session,
            });
        }

        Event::Close => {
            // Bumping the session turns every in-flight reply stale.
            state.session = state.session.next();
            state.reset_session_data();
            state.phase = Phase::Idle;
        }

        Event::Retry => {
            let (stage, cause) = match &state.phase {
                Phase::Failed { stage, cause } => (*stage, cause.clone()),
                _ => return Err(EditorError::invalid(&state, "retry")),
            };
            if !cause.is_retryable() {
                return Err(EditorError::NotRetryable(cause));
            }

            match (stage, &cause) {
                // Unresolved names are retried against a fresh catalog.
                (Stage::Catalog, _) | (_, FailureCause::UnresolvedPermissions(_)) => {
                    state.unresolved.clear();
                    state.phase = Phase::LoadingCatalog;
                    effects.push(Effect::FetchCatalog {
                        session: state.session,
                    });
                }
                (Stage::Role, _) => {
                    let EditorMode::Edit(role_id) = state.mode else {
                        return Err(EditorError::invalid(&state, "retry"));
                    };
                    state.phase = Phase::LoadingRole { role_id };
                    effects.push(Effect::FetchRole {
                        session: state.session,
                        role_id,
                    });
                }
                (Stage::Submit, _) => {
                    let payload = build_payload(&state)?;
                    state.phase = Phase::Submitting;
                    effects.push(Effect::PersistRole {
                        session: state.session,
                        target: persist_target(state.mode),
                        payload,
                    });
                }
            }
        }

        // ====================================================================
        // Collaborator Results
        // ====================================================================
        Event::CatalogLoaded { session, result } => {
            let awaited = matches!(state.phase, Phase::LoadingCatalog);
            if is_stale(&state, session, awaited, "catalog_loaded") {
                return Ok((state, effects));
            }
            return Ok(on_catalog_loaded(state, result));
        }

        Event::RoleLoaded { session, result } => {
            let expected = match state.phase {
                Phase::LoadingRole { role_id } => Some(role_id),
                _ => None,
            };
            if is_stale(&state, session, expected.is_some(), "role_loaded") {
                return Ok((state, effects));
            }
            let Some(role_id) = expected else {
                return Ok((state, effects));
            };

            match result {
                Err(error) => fail(&mut state, Stage::Role, error.into()),
                Ok(role) if role.id != role_id => {
                    warn!(
                        session = %state.session,
                        expected = %role_id,
                        received = %role.id,
                        "Discarding role response for a different role"
                    );
                }
                Ok(role) => on_role_loaded(&mut state, role, &mut effects)?,
            }
        }

        Event::Submitted { session, result } => {
            let awaited = matches!(state.phase, Phase::Submitting);
            if is_stale(&state, session, awaited, "submitted") {
                return Ok((state, effects));
            }

            match result {
                Ok(role) => {
                    debug!(session = %state.session, role = %role.id, "Role saved");
                    // The selection belongs to the session and is discarded on success.
                    state.workspace = None;
                    state.unresolved.clear();
                    state.phase = Phase::Done { role };
                }
                Err(error) => fail(&mut state, Stage::Submit, error.into()),
            }
        }

        // ====================================================================
        // Editing
        // ====================================================================
        Event::Toggle(id) => {
            ready_workspace(&mut state, "toggle")?
                .selection_mut()
                .toggle(id);
        }

        Event::SelectCategory { key, checked } => {
            let workspace = ready_workspace(&mut state, "select_category")?;
            let category = workspace
                .category(&key)
                .cloned()
                .ok_or(EditorError::UnknownCategory(key))?;
            workspace.selection_mut().select_category(&category, checked);
        }

        Event::SelectAll => {
            ready_workspace(&mut state, "select_all")?
                .selection_mut()
                .select_all();
        }

        Event::ClearAll => {
            ready_workspace(&mut state, "clear_all")?
                .selection_mut()
                .clear_all();
        }

        Event::SetName(name) => {
            ensure_ready(&state, "set_name")?;
            state.form.name = name;
            state.errors.errors.retain(|e| e.field != Field::Name);
        }

        Event::SetGuardName(guard_name) => {
            ensure_ready(&state, "set_guard_name")?;
            state.form.guard_name = guard_name;
            state
                .errors
                .errors
                .retain(|e| e.field != Field::GuardName);
        }

        Event::Submit => {
            ensure_ready(&state, "submit")?;

            if let Err(errors) = validate_role(&state.form.name, &state.form.guard_name) {
                debug!(session = %state.session, %errors, "Submit blocked by validation");
                state.errors = errors;
                // Postcondition: invalid forms never reach the network
                debug_assert!(effects.is_empty());
                return Ok((state, effects));
            }

            let payload = build_payload(&state)?;
            state.errors = ValidationErrors::default();
            state.phase = Phase::Submitting;
            effects.push(Effect::PersistRole {
                session: state.session,
                target: persist_target(state.mode),
                payload,
            });
        }
    }

    Ok((state, effects))
}

/// Indexes a freshly fetched catalog and moves on to the role or to Ready.
fn on_catalog_loaded(
    mut state: EditorState,
    result: Result<Vec<Permission>, FetchError>,
) -> (EditorState, Vec<Effect>) {
    let mut effects = Vec::new();

    let permissions = match result {
        Ok(permissions) => permissions,
        Err(error) => {
            fail(&mut state, Stage::Catalog, error.into());
            return (state, effects);
        }
    };

    let catalog = match PermissionCatalog::build(permissions) {
        Ok(catalog) => catalog,
        Err(error) => {
            fail(&mut state, Stage::Catalog, error.into());
            return (state, effects);
        }
    };

    debug!(
        session = %state.session,
        permissions = catalog.len(),
        "Permission catalog indexed"
    );
    state.workspace = Some(Workspace::new(catalog));

    match state.mode {
        EditorMode::Create => state.phase = Phase::Ready,
        EditorMode::Edit(role_id) => {
            state.phase = Phase::LoadingRole { role_id };
            effects.push(Effect::FetchRole {
                session: state.session,
                role_id,
            });
        }
    }

    // Postcondition: the catalog exists before any role is requested
    debug_assert!(state.workspace.is_some());

    (state, effects)
}

/// Resolves the role's permission names into the selection.
fn on_role_loaded(
    state: &mut EditorState,
    role: Role,
    effects: &mut Vec<Effect>,
) -> Result<(), EditorError> {
    let workspace = state
        .workspace
        .as_mut()
        .ok_or(EditorError::CatalogNotLoaded)?;

    let resolution = names_to_ids(&role.permission_names, workspace.catalog());

    if !resolution.is_complete() && state.settings.unresolved_policy == UnresolvedPolicy::Reject {
        let names = resolution.unresolved;
        fail(state, Stage::Role, FailureCause::UnresolvedPermissions(names));
        return Ok(());
    }

    let selection = SelectionModel::with_selected(workspace.catalog(), resolution.ids);
    workspace.replace_selection(selection);

    if !resolution.unresolved.is_empty() {
        effects.push(Effect::ReportUnresolved {
            session: state.session,
            role_id: role.id,
            names: resolution.unresolved.clone(),
        });
    }

    state.unresolved = resolution.unresolved;
    state.form.name = role.name;
    state.form.guard_name = role.guard_name;
    state.phase = Phase::Ready;

    Ok(())
}

fn build_payload(state: &EditorState) -> Result<RolePayload, EditorError> {
    let workspace = state
        .workspace
        .as_ref()
        .ok_or(EditorError::CatalogNotLoaded)?;

    Ok(RolePayload {
        name: state.form.name.clone(),
        guard_name: state.form.guard_name.trim().to_string(),
        permission_names: ids_to_names(workspace.selection().selected_ids(), workspace.catalog()),
    })
}

fn persist_target(mode: EditorMode) -> PersistTarget {
    match mode {
        EditorMode::Create => PersistTarget::Create,
        EditorMode::Edit(role_id) => PersistTarget::Update(role_id),
    }
}

fn fail(state: &mut EditorState, stage: Stage, cause: FailureCause) {
    warn!(
        session = %state.session,
        ?stage,
        %cause,
        retryable = cause.is_retryable(),
        "Role editor failed"
    );
    state.phase = Phase::Failed { stage, cause };
}

/// Returns true (and logs) when a result event must be dropped.
fn is_stale(state: &EditorState, session: SessionId, awaited: bool, event: &'static str) -> bool {
    if session != state.session {
        debug!(
            current = %state.session,
            received = %session,
            event,
            "Discarding response from a closed session"
        );
        return true;
    }
    if !awaited {
        debug!(
            session = %state.session,
            phase = state.phase.name(),
            event,
            "Discarding response not awaited in this phase"
        );
        return true;
    }
    false
}

fn ensure_ready(state: &EditorState, event: &'static str) -> Result<(), EditorError> {
    if state.is_ready() {
        Ok(())
    } else {
        Err(EditorError::invalid(state, event))
    }
}

fn ready_workspace<'a>(
    state: &'a mut EditorState,
    event: &'static str,
) -> Result<&'a mut Workspace, EditorError> {
    ensure_ready(state, event)?;
    state
        .workspace
        .as_mut()
        .ok_or(EditorError::CatalogNotLoaded)
}

/// Errors that can occur when applying events to the kernel.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("event '{event}' is not valid while {phase}")]
    InvalidTransition {
        phase: &'static str,
        event: &'static str,
    },

    #[error("no permission catalog is loaded")]
    CatalogNotLoaded,

    #[error("unknown permission category '{0}'")]
    UnknownCategory(String),

    #[error("cannot retry: {0}")]
    NotRetryable(FailureCause),
}

impl EditorError {
    fn invalid(state: &EditorState, event: &'static str) -> Self {
        EditorError::InvalidTransition {
            phase: state.phase.name(),
            event,
        }
    }
}
