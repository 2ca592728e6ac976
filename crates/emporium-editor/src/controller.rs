//! Stateful wrapper around the kernel.
//!
//! [`RoleAssignmentController`] owns the [`EditorState`] of one editor and
//! applies events to it. A rejected event leaves the state exactly as it
//! was. The controller never executes effects; it hands them back to the
//! caller, which performs them on its own event loop and reports results
//! with the session the effect carried.

use tracing::debug;

use crate::effects::Effect;
use crate::event::Event;
use crate::kernel::{EditorError, apply};
use crate::state::{EditorSettings, EditorState};

/// Orchestrates catalog loading, selection, validation and submission for
/// one role editor.
#[derive(Debug, Clone, Default)]
pub struct RoleAssignmentController {
    state: EditorState,
}

impl RoleAssignmentController {
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            state: EditorState::new(settings),
        }
    }

    /// Applies an event and returns the effects to execute.
    pub fn handle(&mut self, event: Event) -> Result<Vec<Effect>, EditorError> {
        let kind = event.kind();
        let from = self.state.phase().name();

        let (next, effects) = apply(self.state.clone(), event)?;
        self.state = next;

        debug!(
            session = %self.state.session(),
            event = kind,
            from,
            to = self.state.phase().name(),
            effects = effects.len(),
            "Editor transition"
        );

        Ok(effects)
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }
}
