//! # emporium-editor: Role assignment controller
//!
//! The editor is a pure state machine. It receives events (admin input and
//! collaborator results) and produces state changes plus effects to execute.
//!
//! ## Key Principles
//!
//! - **No IO**: The kernel never fetches or saves; it emits [`Effect`]s
//! - **Sessions**: Every effect carries the [`SessionId`](emporium_types::SessionId)
//!   of the editor that requested it; late replies for a closed editor are dropped
//! - **Catalog first**: Role permission names are only resolved against a loaded catalog
//! - **Pure functions**: `apply(state, event) -> (state, effects)`
//!
//! ## Architecture
//!
//! - [`event`]: Inputs (`Open`, `CatalogLoaded`, `Toggle`, `Submit`, ...)
//! - [`effects`]: Work for the host (`FetchCatalog`, `FetchRole`, `PersistRole`, `ReportUnresolved`)
//! - [`state`]: Editor state, lifecycle phases and settings
//! - [`kernel`]: The `apply` function that ties it all together
//! - [`controller`]: Owns the state of one editor
//! - [`runtime`]: Executes effects against [`traits`] implementations
//!
//! ## Lifecycle
//!
//! ```text
//! Idle ──open──▶ LoadingCatalog ──(edit)──▶ LoadingRole ──▶ Ready ──submit──▶ Submitting ──▶ Done
//!                      │                         │            ▲                   │
//!                      └────────── fetch failure ┴────────────┼───────────────────┴──▶ Failed
//!                                                             └── invalid form ──┘     │
//!                                                                                retry ┘
//! ```

pub mod controller;
pub mod effects;
pub mod event;
pub mod kernel;
pub mod runtime;
pub mod state;
pub mod traits;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use controller::RoleAssignmentController;
pub use effects::{Effect, PersistTarget};
pub use event::{EditorMode, Event};
pub use kernel::{EditorError, apply};
pub use runtime::{InMemoryBackend, LogNotifier, RecordingNotifier, Runtime, RuntimeError};
pub use state::{
    EditorSettings, EditorState, FailureCause, Phase, RoleForm, Stage, UnresolvedPolicy, Workspace,
};
pub use traits::{Notifier, PermissionSource, RoleStore};
