//! Key-driven composition session.
//!
//! `CompositionSession` turns raw key events into a composition buffer, a
//! ranked candidate list and committed text, reporting every change to a
//! [`HostAdapter`]. All decisions live in [`state::transition`]; the session
//! only owns the current state and forwards the resulting host calls.

pub mod host;
pub mod key_event;
pub mod state;

pub use host::{HostAdapter, HostCall};
pub use key_event::{key, KeyEvent, Modifiers};
pub use state::{transition, SessionState, Transition};

use crate::core::engine::ImeEngine;
use tracing::{debug, debug_span};

/// One input context's composition state, backed by a shared engine.
pub struct CompositionSession<'a> {
    engine: &'a ImeEngine,
    state: SessionState,
}

impl<'a> CompositionSession<'a> {
    pub fn new(engine: &'a ImeEngine) -> Self {
        Self { engine, state: SessionState::default() }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_composing(&self) -> bool {
        self.state.is_composing()
    }

    /// Whether the session wants this key at all. `false` sends it straight
    /// to the application without calling [`Self::on_key_down`].
    pub fn filter_key_down(&self, event: &KeyEvent) -> bool {
        if self.is_composing() {
            return true;
        }
        // Alt / Ctrl combinations are application shortcuts.
        if event.modifiers.alt || event.modifiers.control {
            return false;
        }
        if event.is_char() && event.as_char().is_some_and(char::is_alphabetic) {
            return true;
        }
        event.is_printable_char() && event.key_code != key::SPACE
    }

    /// Handles a key; returns `false` when the key should still reach the
    /// application.
    pub fn on_key_down(&mut self, event: &KeyEvent, host: &mut dyn HostAdapter) -> bool {
        let _span = debug_span!("on_key_down", ?event).entered();

        let Transition { next, effects, handled } = transition(self.engine, &self.state, event);
        self.state = next;
        for call in &effects {
            call.apply(host);
        }

        debug!(
            handled,
            composing = self.state.is_composing(),
            candidates = self.state.candidates.len(),
            effects = effects.len()
        );
        handled
    }

    /// Starts a fresh composition for a newly focused input context.
    pub fn on_activate(&mut self) {
        debug!("session activated");
        self.state = SessionState::default();
    }

    /// Re-asserts any in-flight composition to the host once, then clears.
    pub fn on_deactivate(&mut self, host: &mut dyn HostAdapter) {
        debug!(composition = %self.state.composition, "session deactivated");
        host.set_composition_string(&self.state.composition);
        self.clear(host);
    }

    fn clear(&mut self, host: &mut dyn HostAdapter) {
        self.state = SessionState::default();
        host.set_candidate_list(&[]);
        host.set_candidate_cursor(0);
        host.set_show_candidates(false);
        host.set_composition_string("");
        host.set_composition_cursor(0);
    }
}
