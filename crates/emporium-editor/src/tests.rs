//! Unit tests for emporium-editor
//!
//! The kernel is pure (no IO), making it ideal for unit testing.
//! Every transition can be tested without mocks; the runtime tests use the
//! in-memory backend.

use std::collections::BTreeSet;

use emporium_rbac::{CatalogError, Field, FieldErrorKind, TriState};
use emporium_types::{FetchError, Permission, PermissionId, Role, RoleId, RolePayload, SessionId};
use test_case::test_case;

use crate::effects::{Effect, PersistTarget};
use crate::event::{EditorMode, Event};
use crate::kernel::{EditorError, apply};
use crate::runtime::{InMemoryBackend, RecordingNotifier, Runtime, RuntimeError};
use crate::state::{EditorSettings, EditorState, FailureCause, Phase, Stage, UnresolvedPolicy};
use crate::traits::RoleStore;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_catalog() -> Vec<Permission> {
    vec![
        Permission::new(1, "view_users", "web"),
        Permission::new(2, "edit_users", "web"),
        Permission::new(3, "view_products", "web"),
    ]
}

fn test_role_id() -> RoleId {
    RoleId::new(7)
}

fn test_role(names: &[&str]) -> Role {
    Role {
        id: test_role_id(),
        name: "support".to_string(),
        guard_name: "web".to_string(),
        permission_names: names.iter().map(ToString::to_string).collect(),
    }
}

fn ids(raw: &[u64]) -> BTreeSet<PermissionId> {
    raw.iter().copied().map(PermissionId::new).collect()
}

/// Applies an event that must be accepted.
fn step(state: EditorState, event: Event) -> (EditorState, Vec<Effect>) {
    apply(state, event).expect("event should be accepted")
}

/// Helper to create a state that finished loading the catalog in create mode.
fn ready_for_create() -> EditorState {
    let (state, _) = step(EditorState::default(), Event::Open(EditorMode::Create));
    let session = state.session();
    let (state, _) = step(
        state,
        Event::CatalogLoaded {
            session,
            result: Ok(test_catalog()),
        },
    );
    assert_eq!(state.phase(), &Phase::Ready);
    state
}

/// Helper to create a state waiting for the role in edit mode.
fn loading_role(settings: EditorSettings) -> EditorState {
    let (state, _) = step(
        EditorState::new(settings),
        Event::Open(EditorMode::Edit(test_role_id())),
    );
    let session = state.session();
    let (state, effects) = step(
        state,
        Event::CatalogLoaded {
            session,
            result: Ok(test_catalog()),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::FetchRole {
            session,
            role_id: test_role_id()
        }]
    );
    state
}

fn ready_for_edit(names: &[&str]) -> EditorState {
    let state = loading_role(EditorSettings::default());
    let session = state.session();
    let (state, _) = step(
        state,
        Event::RoleLoaded {
            session,
            result: Ok(test_role(names)),
        },
    );
    state
}

fn selected(state: &EditorState) -> BTreeSet<PermissionId> {
    state
        .workspace()
        .expect("workspace loaded")
        .selection()
        .selected_ids()
        .clone()
}

// ============================================================================
// Open / Catalog Tests
// ============================================================================

#[test]
fn open_requests_catalog_with_new_session() {
    let state = EditorState::default();
    let before = state.session();

    let (state, effects) = step(state, Event::Open(EditorMode::Create));

    assert_eq!(state.session(), before.next());
    assert_eq!(state.phase(), &Phase::LoadingCatalog);
    assert_eq!(
        effects,
        vec![Effect::FetchCatalog {
            session: state.session()
        }]
    );
    assert!(state.workspace().is_none());
}

#[test]
fn create_mode_prefills_default_guard() {
    let settings = EditorSettings {
        default_guard_name: "admin_api".to_string(),
        ..EditorSettings::default()
    };
    let (state, _) = step(EditorState::new(settings), Event::Open(EditorMode::Create));
    assert_eq!(state.form().guard_name, "admin_api");
    assert!(state.form().name.is_empty());
}

#[test]
fn catalog_in_create_mode_goes_ready_with_categories() {
    let state = ready_for_create();
    let workspace = state.workspace().expect("workspace loaded");

    let keys: Vec<&str> = workspace.categories().iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["view", "edit"]);
    assert!(workspace.selection().is_empty());
    assert!(
        workspace
            .category_states()
            .iter()
            .all(|(_, s)| *s == TriState::Empty)
    );
}

#[test]
fn catalog_in_edit_mode_requests_role() {
    let state = loading_role(EditorSettings::default());
    assert_eq!(
        state.phase(),
        &Phase::LoadingRole {
            role_id: test_role_id()
        }
    );
    // The catalog is indexed before the role is requested.
    assert!(state.workspace().is_some());
}

#[test]
fn catalog_fetch_failure_fails_and_retry_refetches() {
    let (state, _) = step(EditorState::default(), Event::Open(EditorMode::Create));
    let session = state.session();
    let error = FetchError::Unavailable("timeout".into());

    let (state, effects) = step(
        state,
        Event::CatalogLoaded {
            session,
            result: Err(error.clone()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        state.phase(),
        &Phase::Failed {
            stage: Stage::Catalog,
            cause: FailureCause::Fetch(error),
        }
    );

    let (state, effects) = step(state, Event::Retry);
    assert_eq!(state.phase(), &Phase::LoadingCatalog);
    assert_eq!(effects, vec![Effect::FetchCatalog { session }]);
}

#[test]
fn duplicate_ids_fail_hard() {
    let (state, _) = step(EditorState::default(), Event::Open(EditorMode::Create));
    let session = state.session();
    let mut permissions = test_catalog();
    permissions.push(Permission::new(1, "delete_users", "web"));

    let (state, _) = step(
        state,
        Event::CatalogLoaded {
            session,
            result: Ok(permissions),
        },
    );

    let Phase::Failed { stage, cause } = state.phase() else {
        panic!("expected failure, got {:?}", state.phase());
    };
    assert_eq!(*stage, Stage::Catalog);
    assert!(matches!(
        cause,
        FailureCause::MalformedCatalog(CatalogError::DuplicateIdentifier { .. })
    ));
    assert!(!cause.is_retryable());

    let err = apply(state, Event::Retry).expect_err("malformed catalog is not retryable");
    assert!(matches!(err, EditorError::NotRetryable(_)));
}

// ============================================================================
// Role Loading Tests
// ============================================================================

#[test]
fn role_names_resolve_into_selection() {
    let state = ready_for_edit(&["view_users", "edit_users"]);

    assert_eq!(state.phase(), &Phase::Ready);
    assert_eq!(selected(&state), ids(&[1, 2]));
    assert_eq!(state.form().name, "support");
    assert_eq!(state.form().guard_name, "web");
    assert!(state.unresolved().is_empty());
}

#[test]
fn unresolved_names_are_reported_not_fatal() {
    let state = loading_role(EditorSettings::default());
    let session = state.session();

    let (state, effects) = step(
        state,
        Event::RoleLoaded {
            session,
            result: Ok(test_role(&["view_users", "delete_users"])),
        },
    );

    assert_eq!(state.phase(), &Phase::Ready);
    assert_eq!(selected(&state), ids(&[1]));
    assert_eq!(state.unresolved(), &["delete_users".to_string()]);
    assert_eq!(
        effects,
        vec![Effect::ReportUnresolved {
            session,
            role_id: test_role_id(),
            names: vec!["delete_users".to_string()],
        }]
    );

    // view_users and view_products share the "view" category.
    let workspace = state.workspace().expect("workspace loaded");
    let view = workspace.category("view").expect("view category");
    assert_eq!(view.member_ids, ids(&[1, 3]));
    assert_eq!(workspace.selection().category_state(view), TriState::Partial);
}

#[test]
fn reject_policy_fails_on_unresolved_names() {
    let settings = EditorSettings {
        unresolved_policy: UnresolvedPolicy::Reject,
        ..EditorSettings::default()
    };
    let state = loading_role(settings);
    let session = state.session();

    let (state, effects) = step(
        state,
        Event::RoleLoaded {
            session,
            result: Ok(test_role(&["view_users", "delete_users"])),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(
        state.phase(),
        &Phase::Failed {
            stage: Stage::Role,
            cause: FailureCause::UnresolvedPermissions(vec!["delete_users".to_string()]),
        }
    );

    // Retrying starts over from the catalog.
    let (state, effects) = step(state, Event::Retry);
    assert_eq!(state.phase(), &Phase::LoadingCatalog);
    assert_eq!(effects, vec![Effect::FetchCatalog { session }]);
}

#[test]
fn role_fetch_failure_retries_role_only() {
    let state = loading_role(EditorSettings::default());
    let session = state.session();

    let (state, _) = step(
        state,
        Event::RoleLoaded {
            session,
            result: Err(FetchError::NotFound("role 7".into())),
        },
    );
    assert!(matches!(
        state.phase(),
        Phase::Failed {
            stage: Stage::Role,
            ..
        }
    ));

    let (state, effects) = step(state, Event::Retry);
    assert_eq!(
        effects,
        vec![Effect::FetchRole {
            session,
            role_id: test_role_id()
        }]
    );
    assert_eq!(
        state.phase(),
        &Phase::LoadingRole {
            role_id: test_role_id()
        }
    );
}

#[test]
fn role_response_for_other_role_is_discarded() {
    let state = loading_role(EditorSettings::default());
    let session = state.session();
    let mut other = test_role(&["view_users"]);
    other.id = RoleId::new(99);

    let before = state.clone();
    let (state, effects) = step(
        state,
        Event::RoleLoaded {
            session,
            result: Ok(other),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state, before);
}

// ============================================================================
// Stale Response Tests
// ============================================================================

#[test]
fn responses_from_closed_session_are_discarded() {
    let (state, _) = step(EditorState::default(), Event::Open(EditorMode::Create));
    let old_session = state.session();

    let (state, _) = step(state, Event::Close);
    assert_eq!(state.phase(), &Phase::Idle);
    let (state, _) = step(state, Event::Open(EditorMode::Edit(test_role_id())));
    assert_ne!(state.session(), old_session);

    let before = state.clone();
    let (state, effects) = step(
        state,
        Event::CatalogLoaded {
            session: old_session,
            result: Ok(test_catalog()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state, before);
    assert_eq!(state.phase(), &Phase::LoadingCatalog);
}

#[test]
fn close_during_submit_discards_the_reply() {
    let state = ready_for_edit(&["view_users"]);
    let (state, effects) = step(state, Event::Submit);
    let session = effects[0].session();

    let (state, _) = step(state, Event::Close);
    let (state, effects) = step(
        state,
        Event::Submitted {
            session,
            result: Ok(test_role(&["view_users"])),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.phase(), &Phase::Idle);
    assert!(state.workspace().is_none());
}

#[test]
fn reply_not_awaited_in_phase_is_discarded() {
    let state = ready_for_create();
    let session = state.session();
    let before = state.clone();

    let (state, effects) = step(
        state,
        Event::CatalogLoaded {
            session,
            result: Ok(vec![Permission::new(9, "manage_settings", "web")]),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn session_counter_starts_at_zero() {
    assert_eq!(EditorState::default().session(), SessionId::new(0));
}

// ============================================================================
// Editing Tests
// ============================================================================

#[test]
fn editing_events_mutate_selection() {
    let state = ready_for_create();

    let (state, _) = step(state, Event::Toggle(PermissionId::new(2)));
    assert_eq!(selected(&state), ids(&[2]));

    let (state, _) = step(
        state,
        Event::SelectCategory {
            key: "view".to_string(),
            checked: true,
        },
    );
    assert_eq!(selected(&state), ids(&[1, 2, 3]));

    let (state, _) = step(
        state,
        Event::SelectCategory {
            key: "view".to_string(),
            checked: false,
        },
    );
    assert_eq!(selected(&state), ids(&[2]));

    let (state, _) = step(state, Event::SelectAll);
    assert_eq!(selected(&state), ids(&[1, 2, 3]));

    let (state, _) = step(state, Event::ClearAll);
    assert!(selected(&state).is_empty());
}

#[test]
fn toggling_unknown_id_is_a_no_op() {
    let state = ready_for_create();
    let (state, _) = step(state, Event::Toggle(PermissionId::new(42)));
    assert!(selected(&state).is_empty());
}

#[test]
fn unknown_category_is_rejected() {
    let state = ready_for_create();
    let err = apply(
        state,
        Event::SelectCategory {
            key: "archive".to_string(),
            checked: true,
        },
    )
    .expect_err("unknown category");
    assert_eq!(err, EditorError::UnknownCategory("archive".to_string()));
}

#[test]
fn editing_before_ready_is_rejected() {
    let (state, _) = step(EditorState::default(), Event::Open(EditorMode::Create));

    let err = apply(state, Event::Toggle(PermissionId::new(1))).expect_err("not ready");
    assert_eq!(
        err,
        EditorError::InvalidTransition {
            phase: "loading_catalog",
            event: "toggle",
        }
    );
}

#[test_case(Event::Toggle(PermissionId::new(1)), "toggle" ; "toggle")]
#[test_case(Event::SelectAll, "select_all" ; "select all")]
#[test_case(Event::ClearAll, "clear_all" ; "clear all")]
#[test_case(Event::SetName("support".into()), "set_name" ; "set name")]
#[test_case(Event::SetGuardName("web".into()), "set_guard_name" ; "set guard")]
#[test_case(Event::Submit, "submit" ; "submit")]
fn idle_editor_rejects_editing(event: Event, kind: &'static str) {
    let err = apply(EditorState::default(), event).expect_err("idle editor");
    assert_eq!(
        err,
        EditorError::InvalidTransition {
            phase: "idle",
            event: kind,
        }
    );
}

#[test]
fn retry_outside_failure_is_rejected() {
    let state = ready_for_create();
    let err = apply(state, Event::Retry).expect_err("nothing to retry");
    assert_eq!(
        err,
        EditorError::InvalidTransition {
            phase: "ready",
            event: "retry",
        }
    );
}

// ============================================================================
// Submit Tests
// ============================================================================

#[test]
fn invalid_form_stays_ready_without_effects() {
    let state = ready_for_create();
    let (state, _) = step(state, Event::SetName("Store Manager".to_string()));
    let (state, _) = step(state, Event::SetGuardName(String::new()));

    let (state, effects) = step(state, Event::Submit);

    assert!(effects.is_empty());
    assert_eq!(state.phase(), &Phase::Ready);
    assert_eq!(
        state.errors().for_field(Field::Name).map(|e| &e.kind),
        Some(&FieldErrorKind::InvalidCharacters)
    );
    assert_eq!(
        state.errors().for_field(Field::GuardName).map(|e| &e.kind),
        Some(&FieldErrorKind::Required)
    );

    // Editing a field clears only that field's error.
    let (state, _) = step(state, Event::SetName("store_manager".to_string()));
    assert!(state.errors().for_field(Field::Name).is_none());
    assert!(state.errors().for_field(Field::GuardName).is_some());
}

#[test]
fn valid_create_submits_names_in_catalog_order() {
    let state = ready_for_create();
    let (state, _) = step(state, Event::SetName("store_manager".to_string()));
    let (state, _) = step(state, Event::Toggle(PermissionId::new(3)));
    let (state, _) = step(state, Event::Toggle(PermissionId::new(1)));

    let (state, effects) = step(state, Event::Submit);

    assert_eq!(state.phase(), &Phase::Submitting);
    assert!(state.errors().is_empty());
    assert_eq!(
        effects,
        vec![Effect::PersistRole {
            session: state.session(),
            target: PersistTarget::Create,
            payload: RolePayload {
                name: "store_manager".to_string(),
                guard_name: "web".to_string(),
                permission_names: vec!["view_users".to_string(), "view_products".to_string()],
            },
        }]
    );
}

#[test]
fn edit_submit_updates_and_never_resubmits_unresolved() {
    let state = ready_for_edit(&["edit_users", "delete_users"]);

    let (state, effects) = step(state, Event::Submit);

    let [Effect::PersistRole {
        target, payload, ..
    }] = effects.as_slice()
    else {
        panic!("expected a single persist effect, got {effects:?}");
    };
    assert_eq!(*target, PersistTarget::Update(test_role_id()));
    assert_eq!(payload.permission_names, vec!["edit_users".to_string()]);
    assert_eq!(state.phase(), &Phase::Submitting);
}

#[test]
fn guard_is_submitted_trimmed() {
    let state = ready_for_create();
    let (state, _) = step(state, Event::SetName("support".to_string()));
    let (state, _) = step(state, Event::SetGuardName(" web ".to_string()));

    let (_, effects) = step(state, Event::Submit);

    let [Effect::PersistRole { payload, .. }] = effects.as_slice() else {
        panic!("expected a single persist effect, got {effects:?}");
    };
    assert_eq!(payload.guard_name, "web");
}

#[test]
fn name_shared_across_guards_is_submitted_once() {
    let (state, _) = step(EditorState::default(), Event::Open(EditorMode::Create));
    let session = state.session();
    let (state, _) = step(
        state,
        Event::CatalogLoaded {
            session,
            result: Ok(vec![
                Permission::new(1, "view_users", "web"),
                Permission::new(4, "view_users", "api"),
            ]),
        },
    );
    let (state, _) = step(state, Event::SetName("support".to_string()));
    let (state, _) = step(state, Event::SelectAll);

    let (_, effects) = step(state, Event::Submit);

    let [Effect::PersistRole { payload, .. }] = effects.as_slice() else {
        panic!("expected a single persist effect, got {effects:?}");
    };
    assert_eq!(payload.permission_names, vec!["view_users".to_string()]);
}

#[test]
fn successful_save_discards_selection() {
    let state = ready_for_edit(&["view_users"]);
    let (state, effects) = step(state, Event::Submit);
    let session = effects[0].session();
    let saved = test_role(&["view_users"]);

    let (state, effects) = step(
        state,
        Event::Submitted {
            session,
            result: Ok(saved.clone()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.phase(), &Phase::Done { role: saved });
    assert!(state.workspace().is_none());
}

#[test]
fn failed_save_can_be_retried() {
    let state = ready_for_edit(&["view_users"]);
    let (state, effects) = step(state, Event::Submit);
    let first_attempt = effects[0].clone();
    let session = first_attempt.session();

    let (state, _) = step(
        state,
        Event::Submitted {
            session,
            result: Err(FetchError::Unavailable("502".into())),
        },
    );
    assert!(matches!(
        state.phase(),
        Phase::Failed {
            stage: Stage::Submit,
            ..
        }
    ));
    // The selection survives a failed save.
    assert_eq!(selected(&state), ids(&[1]));

    let (state, effects) = step(state, Event::Retry);
    assert_eq!(state.phase(), &Phase::Submitting);
    assert_eq!(effects, vec![first_attempt]);
}

#[test]
fn persist_effect_serializes_for_hosts() {
    let state = ready_for_create();
    let (state, _) = step(state, Event::SetName("auditor".to_string()));
    let (_, effects) = step(state, Event::Submit);

    let json = serde_json::to_value(&effects[0]).expect("serializes");
    assert_eq!(json["PersistRole"]["target"], "Create");
    assert_eq!(json["PersistRole"]["payload"]["name"], "auditor");
    assert_eq!(json["PersistRole"]["payload"]["guard_name"], "web");
}

// ============================================================================
// Runtime Tests
// ============================================================================

fn test_backend() -> InMemoryBackend {
    InMemoryBackend::new(test_catalog()).with_role(test_role(&["view_users", "delete_users"]))
}

#[test]
fn runtime_creates_role_end_to_end() {
    let mut runtime = Runtime::new(test_backend(), RecordingNotifier::default());

    runtime
        .dispatch(Event::Open(EditorMode::Create))
        .expect("open");
    runtime
        .dispatch(Event::SetName("catalog_editor".to_string()))
        .expect("set name");
    runtime
        .dispatch(Event::SelectCategory {
            key: "view".to_string(),
            checked: true,
        })
        .expect("select view");
    runtime.dispatch(Event::Submit).expect("submit");

    let Phase::Done { role } = runtime.state().phase() else {
        panic!("expected done, got {:?}", runtime.state().phase());
    };
    assert_eq!(role.id, RoleId::new(8));
    assert_eq!(
        runtime.backend.role(role.id).map(|r| r.permission_names.clone()),
        Some(vec!["view_users".to_string(), "view_products".to_string()])
    );
}

#[test]
fn runtime_edit_reports_drift_and_saves_resolved_names() {
    let mut runtime = Runtime::new(test_backend(), RecordingNotifier::default());

    runtime
        .dispatch(Event::Open(EditorMode::Edit(test_role_id())))
        .expect("open");
    assert_eq!(runtime.state().phase(), &Phase::Ready);
    assert_eq!(
        runtime.notifier.unresolved,
        vec![(test_role_id(), vec!["delete_users".to_string()])]
    );

    runtime
        .dispatch(Event::Toggle(PermissionId::new(2)))
        .expect("toggle");
    runtime.dispatch(Event::Submit).expect("submit");

    let stored = runtime.backend.role(test_role_id()).expect("role exists");
    assert_eq!(
        stored.permission_names,
        vec!["view_users".to_string(), "edit_users".to_string()]
    );
}

#[test]
fn runtime_recovers_after_transient_failure() {
    let mut backend = test_backend();
    backend.fail_next(FetchError::Unavailable("connection reset".into()));
    let mut runtime = Runtime::new(backend, RecordingNotifier::default());

    runtime
        .dispatch(Event::Open(EditorMode::Create))
        .expect("open");
    assert!(matches!(
        runtime.state().phase(),
        Phase::Failed {
            stage: Stage::Catalog,
            ..
        }
    ));

    runtime.dispatch(Event::Retry).expect("retry");
    assert_eq!(runtime.state().phase(), &Phase::Ready);
    assert_eq!(runtime.backend.calls(), 2);
}

#[test]
fn runtime_surfaces_backend_rejection() {
    let mut runtime = Runtime::new(test_backend(), RecordingNotifier::default());

    runtime
        .dispatch(Event::Open(EditorMode::Create))
        .expect("open");
    runtime
        .dispatch(Event::SetName("support".to_string()))
        .expect("set name");
    runtime.dispatch(Event::Submit).expect("submit");

    let Phase::Failed { stage, cause } = runtime.state().phase() else {
        panic!("expected failure, got {:?}", runtime.state().phase());
    };
    assert_eq!(*stage, Stage::Submit);
    assert!(matches!(cause, FailureCause::Fetch(FetchError::Rejected(_))));
}

#[test]
fn backend_seeded_with_largest_role_id_does_not_overflow() {
    let mut role = test_role(&["view_users"]);
    role.id = RoleId::new(u64::MAX);
    let mut backend = InMemoryBackend::new(test_catalog()).with_role(role);

    assert!(backend.role(RoleId::new(u64::MAX)).is_some());

    // Creating cannot reuse the occupied id or wrap around to a low one.
    let payload = RolePayload {
        name: "auditor".to_string(),
        guard_name: "web".to_string(),
        permission_names: Vec::new(),
    };
    let err = backend.create_role(payload).expect_err("id space exhausted");
    assert!(matches!(err, FetchError::Rejected(_)));
    assert_eq!(backend.roles().count(), 1);
}

#[test]
fn runtime_resolves_role_with_largest_id() {
    let mut role = test_role(&["view_users"]);
    role.id = RoleId::new(u64::MAX);
    let backend = InMemoryBackend::new(test_catalog()).with_role(role);
    let mut runtime = Runtime::new(backend, RecordingNotifier::default());

    runtime
        .dispatch(Event::Open(EditorMode::Edit(RoleId::new(u64::MAX))))
        .expect("open");
    assert_eq!(runtime.state().phase(), &Phase::Ready);
    assert_eq!(selected(runtime.state()), ids(&[1]));
}

#[test]
fn runtime_returns_rejected_events() {
    let mut runtime = Runtime::new(test_backend(), RecordingNotifier::default());
    let err = runtime
        .dispatch(Event::Submit)
        .expect_err("idle editor cannot submit");
    assert_eq!(
        err,
        RuntimeError::Editor(EditorError::InvalidTransition {
            phase: "idle",
            event: "submit",
        })
    );
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_edit_event() -> impl Strategy<Value = Event> {
        prop_oneof![
            (0u64..6).prop_map(|id| Event::Toggle(PermissionId::new(id))),
            (prop::sample::select(vec!["view", "edit"]), any::<bool>()).prop_map(
                |(key, checked)| Event::SelectCategory {
                    key: key.to_string(),
                    checked,
                }
            ),
            Just(Event::SelectAll),
            Just(Event::ClearAll),
            "[a-z_A-Z ]{0,8}".prop_map(Event::SetName),
            Just(Event::Submit),
        ]
    }

    proptest! {
        #[test]
        fn selection_never_leaves_catalog(events in prop::collection::vec(arb_edit_event(), 0..30)) {
            let catalog_ids = ids(&[1, 2, 3]);
            let mut state = ready_for_create();

            for event in events {
                // Submit may move out of Ready; later edits are then rejected.
                match apply(state.clone(), event) {
                    Ok((next, _)) => state = next,
                    Err(err) => prop_assert!(
                        matches!(err, EditorError::InvalidTransition { .. }),
                        "unexpected error {:?}", err
                    ),
                }
                if let Some(workspace) = state.workspace() {
                    prop_assert!(workspace.selection().selected_ids().is_subset(&catalog_ids));
                }
            }
        }

        #[test]
        fn stale_sessions_never_change_state(offset in 1u64..5) {
            let state = ready_for_create();
            let stale = SessionId::new(state.session().as_u64() + offset);
            let before = state.clone();

            let (state, effects) = step(state, Event::Submitted {
                session: stale,
                result: Ok(test_role(&[])),
            });
            prop_assert!(effects.is_empty());
            prop_assert_eq!(state, before);
        }
    }
}
