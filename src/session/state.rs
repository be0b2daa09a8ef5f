//! The composition state record and the single key-handling transition.
//!
//! `transition` is pure: it reads the current state and a key event and
//! returns the next state plus the host calls to emit. The session applies
//! both, so no half-updated state is ever visible to the host.

use crate::core::engine::ImeEngine;
use crate::core::types::Candidate;
use crate::session::host::HostCall;
use crate::session::key_event::{key, KeyEvent};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Uncommitted text, in the casing the user typed it.
    pub composition: String,
    pub candidates: Vec<Candidate>,
    pub cursor: usize,
    pub show_candidates: bool,
}

impl SessionState {
    pub fn is_composing(&self) -> bool {
        !self.composition.is_empty()
    }

    /// Headword of the selected candidate, or the raw buffer when the
    /// cursor points past the list.
    pub fn selected_output(&self) -> &str {
        if self.cursor < self.candidates.len() {
            self.headword_at(self.cursor)
        } else {
            &self.composition
        }
    }

    /// Callers check the bound first; an out-of-range index means the
    /// cursor invariant was broken somewhere.
    fn headword_at(&self, index: usize) -> &str {
        match self.candidates.get(index) {
            Some(candidate) => &candidate.headword,
            None => panic!(
                "candidate index {index} out of range for {} candidates",
                self.candidates.len()
            ),
        }
    }
}

/// Result of handling one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: SessionState,
    pub effects: Vec<HostCall>,
    /// `false` forwards the key to the application.
    pub handled: bool,
}

/// Accumulates the next state and its host calls while a key is handled.
struct Step {
    state: SessionState,
    effects: Vec<HostCall>,
}

impl Step {
    fn new(state: &SessionState) -> Self {
        Self { state: state.clone(), effects: Vec::new() }
    }

    fn finish(self, handled: bool) -> Transition {
        Transition { next: self.state, effects: self.effects, handled }
    }

    fn commit(&mut self, text: String) {
        self.effects.push(HostCall::SetCommitString(text));
    }

    fn commit_and_clear(mut self, text: String, handled: bool) -> Transition {
        self.commit(text);
        self.clear();
        self.finish(handled)
    }

    fn clear(&mut self) {
        self.state = SessionState::default();
        self.effects.extend([
            HostCall::SetCandidateList(Vec::new()),
            HostCall::SetCandidateCursor(0),
            HostCall::SetShowCandidates(false),
            HostCall::SetCompositionString(String::new()),
            HostCall::SetCompositionCursor(0),
        ]);
    }

    fn input_with_candidates(&mut self, engine: &ImeEngine, input: String) {
        let candidates = engine.candidates(&input);
        let display: Vec<String> = candidates.iter().map(Candidate::display).collect();
        self.effects.extend([
            HostCall::SetCompositionString(input.clone()),
            HostCall::SetCompositionCursor(input.chars().count()),
            HostCall::SetCandidateList(display),
            HostCall::SetCandidateCursor(0),
            HostCall::SetShowCandidates(true),
        ]);
        self.state = SessionState { composition: input, candidates, cursor: 0, show_candidates: true };
    }

    fn move_cursor(&mut self, index: usize) {
        self.state.cursor = index;
        self.effects.push(HostCall::SetCandidateCursor(index));
    }
}

/// Handles one key-down event.
pub fn transition(engine: &ImeEngine, state: &SessionState, event: &KeyEvent) -> Transition {
    let mut step = Step::new(state);
    let ch = event.as_char();

    if state.show_candidates {
        if event.modifiers.control {
            // Commit, but let the shortcut still reach the application.
            return step.commit_and_clear(state.composition.clone(), false);
        }
        if event.key_code == key::ESCAPE {
            return step.commit_and_clear(state.composition.clone(), true);
        }
        if let Some(index) = event.selection_index() {
            if index < state.candidates.len() {
                let word = state.headword_at(index).to_string();
                return step.commit_and_clear(word, true);
            }
        }
    }

    if !state.is_composing() && matches!(event.key_code, key::RETURN | key::BACK) {
        return step.finish(false);
    }

    match event.key_code {
        key::RETURN => step.commit_and_clear(state.selected_output().to_string(), true),
        key::BACK => {
            let mut input = state.composition.clone();
            if input.chars().count() > 1 {
                input.pop();
                step.input_with_candidates(engine, input);
                step.finish(true)
            } else {
                step.commit_and_clear(String::new(), true)
            }
        }
        key::SPACE => {
            let typed = ch.unwrap_or(' ');
            step.commit_and_clear(format!("{}{typed}", state.selected_output()), true)
        }
        _ => match ch {
            Some(c) if c.is_ascii_punctuation() => {
                step.commit_and_clear(format!("{}{c}", state.selected_output()), true)
            }
            Some(c) if c.is_alphabetic() => {
                let mut input = state.composition.clone();
                input.push(c);
                step.input_with_candidates(engine, input);
                step.finish(true)
            }
            Some(c) if c.is_ascii_digit() => step.commit_and_clear(c.to_string(), true),
            _ => match event.key_code {
                key::LEFT | key::UP => {
                    if state.cursor > 0 {
                        step.move_cursor(state.cursor - 1);
                    }
                    step.finish(true)
                }
                key::RIGHT | key::DOWN => {
                    if state.cursor + 1 < state.candidates.len() {
                        step.move_cursor(state.cursor + 1);
                    }
                    step.finish(true)
                }
                _ => step.finish(false),
            },
        },
    }
}
