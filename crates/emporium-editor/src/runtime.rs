//! Runtime layer that executes editor effects.
//!
//! The kernel is pure and produces effects. The runtime takes these effects
//! and executes them using concrete implementations of the
//! [`PermissionSource`], [`RoleStore`] and [`Notifier`] traits, feeding each
//! result back into the controller until no effects remain.
//!
//! Collaborators are called synchronously, so every reply carries the
//! session that is current when it is delivered. Hosts with an asynchronous
//! data layer drive [`RoleAssignmentController`] directly instead.
//!
//! ## Example
//!
//! ```
//! use emporium_editor::{EditorMode, Event, InMemoryBackend, LogNotifier, Phase, Runtime};
//! use emporium_types::Permission;
//!
//! let backend = InMemoryBackend::new(vec![Permission::new(1, "view_users", "web")]);
//! let mut runtime = Runtime::new(backend, LogNotifier);
//!
//! runtime.dispatch(Event::Open(EditorMode::Create))?;
//! assert_eq!(runtime.state().phase(), &Phase::Ready);
//! # Ok::<(), emporium_editor::RuntimeError>(())
//! ```

use std::collections::{BTreeMap, VecDeque};

use emporium_types::{FetchError, Permission, Role, RoleId, RolePayload};
use tracing::warn;

use crate::controller::RoleAssignmentController;
use crate::effects::{Effect, PersistTarget};
use crate::event::Event;
use crate::kernel::EditorError;
use crate::state::{EditorSettings, EditorState};
use crate::traits::{Notifier, PermissionSource, RoleStore};

/// Runtime that executes editor effects using pluggable collaborators.
///
/// The backend implements both the read and write side of the API.
pub struct Runtime<B, N>
where
    B: PermissionSource + RoleStore,
    N: Notifier,
{
    controller: RoleAssignmentController,
    /// Data layer.
    pub backend: B,
    /// Warning sink.
    pub notifier: N,
}

impl<B, N> Runtime<B, N>
where
    B: PermissionSource + RoleStore,
    N: Notifier,
{
    /// Creates a runtime with default editor settings.
    pub fn new(backend: B, notifier: N) -> Self {
        Self::with_settings(backend, notifier, EditorSettings::default())
    }

    pub fn with_settings(backend: B, notifier: N, settings: EditorSettings) -> Self {
        Self {
            controller: RoleAssignmentController::new(settings),
            backend,
            notifier,
        }
    }

    /// Applies an event and runs every effect it (transitively) produces.
    ///
    /// Stops at the first rejected event and returns it.
    pub fn dispatch(&mut self, event: Event) -> Result<(), RuntimeError> {
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            let effects = self.controller.handle(event)?;
            for effect in effects {
                if let Some(reply) = self.execute_effect(effect) {
                    queue.push_back(reply);
                }
            }
        }

        Ok(())
    }

    /// Executes a single effect, returning the event that reports its result.
    pub fn execute_effect(&mut self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::FetchCatalog { session } => Some(Event::CatalogLoaded {
                session,
                result: self.backend.fetch_catalog(),
            }),

            Effect::FetchRole { session, role_id } => Some(Event::RoleLoaded {
                session,
                result: self.backend.fetch_role(role_id),
            }),

            Effect::PersistRole {
                session,
                target,
                payload,
            } => {
                let result = match target {
                    PersistTarget::Create => self.backend.create_role(payload),
                    PersistTarget::Update(role_id) => self.backend.update_role(role_id, payload),
                };
                Some(Event::Submitted { session, result })
            }

            Effect::ReportUnresolved { role_id, names, .. } => {
                self.notifier.unresolved_permissions(role_id, &names);
                None
            }
        }
    }

    pub fn state(&self) -> &EditorState {
        self.controller.state()
    }

    pub fn controller(&self) -> &RoleAssignmentController {
        &self.controller
    }
}

/// Errors that can occur while driving the editor.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("editor error: {0}")]
    Editor(#[from] EditorError),
}

// ============================================================================
// Implementations
// ============================================================================

/// Notifier that writes warnings to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn unresolved_permissions(&mut self, role_id: RoleId, names: &[String]) {
        warn!(
            role = %role_id,
            names = ?names,
            "Role references permissions missing from the catalog; they were left unselected"
        );
    }
}

/// Notifier that keeps every warning, for inspection in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    pub unresolved: Vec<(RoleId, Vec<String>)>,
}

impl Notifier for RecordingNotifier {
    fn unresolved_permissions(&mut self, role_id: RoleId, names: &[String]) {
        self.unresolved.push((role_id, names.to_vec()));
    }
}

/// In-memory back office for testing and development.
///
/// Behaves like the real API for the shapes the editor uses: role names
/// are unique, updates replace the stored permission names. Failures can
/// be queued with [`InMemoryBackend::fail_next`]; each call consumes one.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    permissions: Vec<Permission>,
    roles: BTreeMap<RoleId, Role>,
    next_role_id: u64,
    failures: VecDeque<FetchError>,
    calls: u64,
}

impl InMemoryBackend {
    pub fn new(permissions: Vec<Permission>) -> Self {
        Self {
            permissions,
            roles: BTreeMap::new(),
            next_role_id: 1,
            failures: VecDeque::new(),
            calls: 0,
        }
    }

    /// Seeds a role, keeping its id.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.next_role_id = self.next_role_id.max(u64::from(role.id).saturating_add(1));
        self.roles.insert(role.id, role);
        self
    }

    /// Makes the next collaborator call fail with `error`.
    pub fn fail_next(&mut self, error: FetchError) {
        self.failures.push_back(error);
    }

    pub fn role(&self, role_id: RoleId) -> Option<&Role> {
        self.roles.get(&role_id)
    }

    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.values()
    }

    /// Number of collaborator calls made so far.
    pub fn calls(&self) -> u64 {
        self.calls
    }

    fn begin_call(&mut self) -> Result<(), FetchError> {
        self.calls += 1;
        match self.failures.pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn name_taken(&self, name: &str, except: Option<RoleId>) -> bool {
        self.roles
            .values()
            .any(|role| role.name == name && Some(role.id) != except)
    }
}

impl PermissionSource for InMemoryBackend {
    fn fetch_catalog(&mut self) -> Result<Vec<Permission>, FetchError> {
        self.begin_call()?;
        Ok(self.permissions.clone())
    }

    fn fetch_role(&mut self, role_id: RoleId) -> Result<Role, FetchError> {
        self.begin_call()?;
        self.roles
            .get(&role_id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(format!("role {role_id}")))
    }
}

impl RoleStore for InMemoryBackend {
    fn create_role(&mut self, payload: RolePayload) -> Result<Role, FetchError> {
        self.begin_call()?;
        if self.name_taken(&payload.name, None) {
            return Err(FetchError::Rejected(format!(
                "role name '{}' is already taken",
                payload.name
            )));
        }

        let id = RoleId::new(self.next_role_id);
        if self.roles.contains_key(&id) {
            return Err(FetchError::Rejected("role id space exhausted".to_string()));
        }

        let role = Role {
            id,
            name: payload.name,
            guard_name: payload.guard_name,
            permission_names: payload.permission_names,
        };
        self.next_role_id = self.next_role_id.saturating_add(1);
        self.roles.insert(role.id, role.clone());
        Ok(role)
    }

    fn update_role(&mut self, role_id: RoleId, payload: RolePayload) -> Result<Role, FetchError> {
        self.begin_call()?;
        if !self.roles.contains_key(&role_id) {
            return Err(FetchError::NotFound(format!("role {role_id}")));
        }
        if self.name_taken(&payload.name, Some(role_id)) {
            return Err(FetchError::Rejected(format!(
                "role name '{}' is already taken",
                payload.name
            )));
        }

        let role = Role {
            id: role_id,
            name: payload.name,
            guard_name: payload.guard_name,
            permission_names: payload.permission_names,
        };
        self.roles.insert(role_id, role.clone());
        Ok(role)
    }
}
