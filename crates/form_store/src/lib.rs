//! In-memory form state store: saved forms, the draft being edited and the
//! responses collected so far, changed only through [`Transition`]s.

use std::sync::Arc;

use shared::protocol::Transition;
use tracing::debug;

mod reducer;
mod services;
mod state;

pub use reducer::{reduce, DispatchOutcome, Reduced};
pub use services::{Clock, IdGenerator, RandomIds, SystemClock};
pub use state::StoreState;

/// Owns the current [`StoreState`] snapshot. Every dispatch replaces the
/// snapshot as a whole; readers holding an older `Arc` keep seeing the old one.
pub struct FormStore {
    state: Arc<StoreState>,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FormStore {
    pub fn new() -> Self {
        Self::with_services(RandomIds, SystemClock)
    }

    pub fn with_services(ids: impl IdGenerator + 'static, clock: impl Clock + 'static) -> Self {
        Self {
            state: Arc::new(StoreState::default()),
            ids: Box::new(ids),
            clock: Box::new(clock),
        }
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn snapshot(&self) -> Arc<StoreState> {
        Arc::clone(&self.state)
    }

    pub fn dispatch(&mut self, transition: Transition) -> DispatchOutcome {
        let name = transition.name();
        let outcome = match reduce(&self.state, transition, self.ids.as_ref(), self.clock.as_ref())
        {
            Reduced::Changed { state, outcome } => {
                self.state = Arc::new(state);
                outcome
            }
            Reduced::Unchanged => DispatchOutcome::Unchanged,
        };
        debug!(transition = name, ?outcome, "applied transition");
        outcome
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
