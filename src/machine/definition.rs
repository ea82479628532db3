//! Per-state transition table and lifecycle callbacks.

use crate::core::{State, Trigger};
use crate::machine::error::MachineError;
use std::collections::HashMap;
use std::fmt;

/// Callback run on entry to or exit from a state.
///
/// Entry callbacks receive the state the machine came from; exit callbacks
/// receive the state it is heading to.
pub type StateCallback<S> = Box<dyn FnMut(&S) + Send>;

/// Callback run on every update or fixed update tick.
pub type TickCallback = Box<dyn FnMut() + Send>;

/// Configuration and behavior of one registered state.
///
/// Definitions are created and owned by the [`StateMachine`]; callers reach
/// them through [`StateMachine::configure_state`] and chain the configuration
/// methods on the returned reference.
///
/// [`StateMachine`]: crate::machine::StateMachine
/// [`StateMachine::configure_state`]: crate::machine::StateMachine::configure_state
pub struct StateDefinition<S: State, T: Trigger> {
    id: S,
    transitions: HashMap<T, S>,
    pub(crate) on_entry: Option<StateCallback<S>>,
    pub(crate) on_exit: Option<StateCallback<S>>,
    pub(crate) on_update: Option<TickCallback>,
    pub(crate) on_fixed_update: Option<TickCallback>,
}

impl<S: State, T: Trigger> StateDefinition<S, T> {
    pub(crate) fn new(id: S) -> Self {
        Self {
            id,
            transitions: HashMap::new(),
            on_entry: None,
            on_exit: None,
            on_update: None,
            on_fixed_update: None,
        }
    }

    /// The state this definition describes.
    pub fn id(&self) -> &S {
        &self.id
    }

    /// Allow `trigger` to move the machine from this state to `target`.
    ///
    /// The target does not have to be registered yet; it is checked when
    /// the transition is performed. Declaring the same trigger twice for one
    /// state is rejected with [`MachineError::DuplicateTrigger`] and leaves
    /// the first declaration in place.
    pub fn allow(&mut self, trigger: T, target: S) -> Result<&mut Self, MachineError<S, T>> {
        if self.transitions.contains_key(&trigger) {
            return Err(MachineError::DuplicateTrigger {
                trigger,
                state: self.id.clone(),
            });
        }

        self.transitions.insert(trigger, target);
        Ok(self)
    }

    /// Set the callback run when the machine enters this state.
    pub fn set_on_entry<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&S) + Send + 'static,
    {
        self.on_entry = Some(Box::new(callback));
        self
    }

    /// Set the callback run when the machine leaves this state.
    pub fn set_on_exit<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&S) + Send + 'static,
    {
        self.on_exit = Some(Box::new(callback));
        self
    }

    /// Set the callback run by [`StateMachine::update`] while this state is current.
    ///
    /// [`StateMachine::update`]: crate::machine::StateMachine::update
    pub fn set_update_method<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_update = Some(Box::new(callback));
        self
    }

    /// Set the callback run by [`StateMachine::fixed_update`] while this state is current.
    ///
    /// [`StateMachine::fixed_update`]: crate::machine::StateMachine::fixed_update
    pub fn set_fixed_update_method<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_fixed_update = Some(Box::new(callback));
        self
    }

    /// Target state for `trigger`, if one was allowed.
    pub fn target_for(&self, trigger: &T) -> Option<&S> {
        self.transitions.get(trigger)
    }

    /// Every allowed `(trigger, target)` pair, in no particular order.
    pub fn transitions(&self) -> impl Iterator<Item = (&T, &S)> {
        self.transitions.iter()
    }

    pub fn has_on_entry(&self) -> bool {
        self.on_entry.is_some()
    }

    pub fn has_on_exit(&self) -> bool {
        self.on_exit.is_some()
    }

    pub fn has_update(&self) -> bool {
        self.on_update.is_some()
    }

    pub fn has_fixed_update(&self) -> bool {
        self.on_fixed_update.is_some()
    }
}

impl<S: State, T: Trigger> fmt::Debug for StateDefinition<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDefinition")
            .field("id", &self.id)
            .field("transitions", &self.transitions)
            .field("on_entry", &self.has_on_entry())
            .field("on_exit", &self.has_on_exit())
            .field("on_update", &self.has_update())
            .field("on_fixed_update", &self.has_fixed_update())
            .finish()
    }
}
