//! Page start-up decisions
//!
//! Kept apart from the wasm glue in `bindings` so they can be tested natively.

use std::cell::Cell;

/// When to run start-up work, from `document.readyState`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomReady {
    /// Still parsing: wait for `DOMContentLoaded`
    Defer,
    /// "interactive" or "complete": the structure is there
    RunNow,
}

impl DomReady {
    pub fn from_ready_state(state: &str) -> Self {
        if state == "loading" {
            DomReady::Defer
        } else {
            DomReady::RunNow
        }
    }
}

/// Guard so the toggle's click listener is attached at most once
#[derive(Debug, Default)]
pub struct ClickBinding {
    bound: Cell<bool>,
}

impl ClickBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind only when the button exists and no listener is attached yet
    pub fn should_bind(&self, control_found: bool) -> bool {
        control_found && !self.bound.get()
    }

    /// Call once the listener was actually attached
    pub fn mark_bound(&self) {
        self.bound.set(true);
    }

    pub fn is_bound(&self) -> bool {
        self.bound.get()
    }
}
