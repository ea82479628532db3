//! Read-only view of a machine's current state.

use crate::core::State;
use parking_lot::RwLock;
use std::sync::Arc;

/// Cloneable handle that always reads the machine's current state.
///
/// A watch is the way for callbacks to observe the machine while a
/// transition runs: exit callbacks still read the state being left, entry
/// callbacks already read the state being entered. It cannot change the
/// machine.
#[derive(Clone, Debug)]
pub struct StateWatch<S: State> {
    current: Arc<RwLock<S>>,
}

impl<S: State> StateWatch<S> {
    pub(crate) fn new(initial: S) -> Self {
        Self {
            current: Arc::new(RwLock::new(initial)),
        }
    }

    pub(crate) fn publish(&self, state: S) {
        *self.current.write() = state;
    }

    /// Current state of the watched machine.
    pub fn current(&self) -> S {
        self.current.read().clone()
    }

    /// Whether the watched machine is in `state`.
    pub fn is(&self, state: &S) -> bool {
        *self.current.read() == *state
    }
}
