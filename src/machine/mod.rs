//! Trigger-driven state machine.
//!
//! The machine owns one [`StateDefinition`] per registered state and a
//! pointer to the current one. Feeding it a trigger runs the current state's
//! exit callback, swaps the current state, then runs the new state's entry
//! callback. Update ticks are forwarded to whichever state is current.
//!
//! Every mutating operation takes `&mut self`, so a callback cannot start a
//! nested transition on the machine that is running it. Callbacks that need
//! to know where the machine is use a [`StateWatch`].

mod definition;
mod error;
mod watch;

pub use definition::{StateCallback, StateDefinition, TickCallback};
pub use error::MachineError;
pub use watch::StateWatch;

use crate::builder::MachineConfig;
use crate::checkpoint::{Checkpoint, CheckpointError, MachineMetadata, CHECKPOINT_VERSION};
use crate::core::state::check_domain;
use crate::core::{State, TransitionLog, Trigger};
use chrono::Utc;
use log::{debug, info, trace, warn};
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use uuid::Uuid;

/// Finite state machine over the closed domains `S` and `T`.
///
/// # Example
///
/// ```rust
/// use statecraft::machine::StateMachine;
/// use statecraft::{state_enum, trigger_enum};
///
/// state_enum! {
///     enum Phase { Idle, Running }
/// }
///
/// trigger_enum! {
///     enum Command { Start, Stop }
/// }
///
/// let mut machine = StateMachine::<Phase, Command>::new(Phase::Idle)?;
/// machine.configure_state(Phase::Idle).allow(Command::Start, Phase::Running)?;
/// machine.configure_state(Phase::Running).allow(Command::Stop, Phase::Idle)?;
///
/// machine.perform_transition(Command::Start)?;
/// assert_eq!(machine.current_state(), &Phase::Running);
/// # Ok::<(), statecraft::machine::MachineError<Phase, Command>>(())
/// ```
pub struct StateMachine<S: State, T: Trigger> {
    states: HashMap<S, StateDefinition<S, T>>,
    current: S,
    initial: S,
    watch: StateWatch<S>,
    history: TransitionLog<S, T>,
    metadata: MachineMetadata,
    config: MachineConfig,
}

impl<S: State, T: Trigger> StateMachine<S, T> {
    /// Create a machine in `initial` with the default configuration.
    ///
    /// Fails with [`MachineError::InvalidConfiguration`] when either domain
    /// is empty or lists a value twice, or when `initial` is not part of the
    /// state domain.
    pub fn new(initial: S) -> Result<Self, MachineError<S, T>> {
        Self::with_config(initial, MachineConfig::default())
    }

    /// Create a machine in `initial` with an explicit configuration.
    pub fn with_config(initial: S, config: MachineConfig) -> Result<Self, MachineError<S, T>> {
        check_domain("state", S::variants()).map_err(MachineError::invalid)?;
        check_domain("trigger", T::variants()).map_err(MachineError::invalid)?;
        if !S::variants().contains(&initial) {
            return Err(MachineError::invalid(format!(
                "initial state {initial:?} is not part of the state domain"
            )));
        }

        let history = config.empty_log();

        let mut machine = Self {
            states: HashMap::new(),
            current: initial.clone(),
            initial: initial.clone(),
            watch: StateWatch::new(initial.clone()),
            history,
            metadata: MachineMetadata::default(),
            config,
        };
        machine.configure_state(initial);

        Ok(machine)
    }

    /// Get the definition of `id`, registering an empty one first if needed.
    ///
    /// Repeated calls with the same identifier return the same definition,
    /// so a state can be configured over several statements.
    pub fn configure_state(&mut self, id: S) -> &mut StateDefinition<S, T> {
        self.states.entry(id).or_insert_with_key(|id| {
            debug!("registering state {}", id.name());
            StateDefinition::new(id.clone())
        })
    }

    /// Move the machine along the transition `trigger` allows from the
    /// current state.
    ///
    /// Runs the current state's exit callback with the target, makes the
    /// target current, then runs the target's entry callback with the
    /// previous state. A failed call changes nothing and runs no callback.
    pub fn perform_transition(&mut self, trigger: T) -> Result<(), MachineError<S, T>> {
        let target = self
            .states
            .get(&self.current)
            .and_then(|definition| definition.target_for(&trigger))
            .cloned()
            .ok_or_else(|| MachineError::UnknownTrigger {
                trigger: trigger.clone(),
                state: self.current.clone(),
            })
            .inspect_err(|_| {
                warn!(
                    "trigger {} rejected in state {}",
                    trigger.name(),
                    self.current.name()
                )
            })?;

        if !self.states.contains_key(&target) {
            return Err(MachineError::UnknownTargetState {
                trigger,
                from: self.current.clone(),
                target,
            });
        }

        if let Some(on_exit) = self
            .states
            .get_mut(&self.current)
            .and_then(|definition| definition.on_exit.as_mut())
        {
            on_exit(&target);
        }

        let previous = std::mem::replace(&mut self.current, target);
        self.watch.publish(self.current.clone());

        if let Some(on_entry) = self
            .states
            .get_mut(&self.current)
            .and_then(|definition| definition.on_entry.as_mut())
        {
            on_entry(&previous);
        }

        debug!(
            "{} -> {} on {}",
            previous.name(),
            self.current.name(),
            trigger.name()
        );

        let now = Utc::now();
        self.metadata.note_transition(trigger.name(), now);
        if self.config.record_history {
            self.history
                .record(previous, self.current.clone(), trigger, now);
        }

        Ok(())
    }

    /// Run the current state's update callback, if it has one.
    pub fn update(&mut self) {
        if let Some(on_update) = self
            .states
            .get_mut(&self.current)
            .and_then(|definition| definition.on_update.as_mut())
        {
            trace!("update in {}", self.current.name());
            on_update();
        }
    }

    /// Run the current state's fixed update callback, if it has one.
    pub fn fixed_update(&mut self) {
        if let Some(on_fixed_update) = self
            .states
            .get_mut(&self.current)
            .and_then(|definition| definition.on_fixed_update.as_mut())
        {
            trace!("fixed update in {}", self.current.name());
            on_fixed_update();
        }
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// State the machine was created in.
    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    /// Handle that keeps reading the current state, usable from callbacks.
    pub fn watch(&self) -> StateWatch<S> {
        self.watch.clone()
    }

    pub fn is_registered(&self, id: &S) -> bool {
        self.states.contains_key(id)
    }

    /// Definition of a registered state.
    pub fn definition(&self, id: &S) -> Option<&StateDefinition<S, T>> {
        self.states.get(id)
    }

    /// Registered states, in no particular order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.states.keys()
    }

    /// Whether `trigger` is allowed from the current state.
    pub fn can_fire(&self, trigger: &T) -> bool {
        self.states
            .get(&self.current)
            .is_some_and(|definition| definition.target_for(trigger).is_some())
    }

    /// Triggers allowed from the current state.
    pub fn permitted_triggers(&self) -> Vec<&T> {
        self.states
            .get(&self.current)
            .map(|definition| definition.transitions().map(|(trigger, _)| trigger).collect())
            .unwrap_or_default()
    }

    /// Log of performed transitions (pure)
    pub fn history(&self) -> &TransitionLog<S, T> {
        &self.history
    }

    pub fn metadata(&self) -> &MachineMetadata {
        &self.metadata
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Check every declared transition against the registered states.
    ///
    /// Reports all transitions whose target was never registered instead of
    /// stopping at the first one.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<MachineError<S, T>>> {
        let checks: Vec<Validation<(), NonEmptyVec<MachineError<S, T>>>> = self
            .states
            .values()
            .flat_map(|definition| {
                definition.transitions().map(move |(trigger, target)| {
                    if self.states.contains_key(target) {
                        Validation::success(())
                    } else {
                        Validation::fail(MachineError::UnknownTargetState {
                            trigger: trigger.clone(),
                            from: definition.id().clone(),
                            target: target.clone(),
                        })
                    }
                })
            })
            .collect();

        Validation::all_vec(checks).map(|_| ())
    }

    /// Snapshot the machine's runtime position.
    ///
    /// Transition tables and callbacks are configuration and are not part of
    /// the checkpoint; restore it onto a machine configured the same way.
    pub fn checkpoint(&self) -> Checkpoint<S, T> {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            initial_state: self.initial.clone(),
            current_state: self.current.clone(),
            history: self.history.clone(),
            metadata: self.metadata.clone(),
        }
    }

    /// Move the machine to the position recorded in `checkpoint`.
    ///
    /// No entry or exit callback runs. The restored log follows this
    /// machine's configuration: it is cut down to the configured limit, or
    /// left empty when history recording is off. Fails without changing the
    /// machine if the checkpoint is malformed or mentions a state this
    /// machine does not have.
    pub fn restore(&mut self, checkpoint: Checkpoint<S, T>) -> Result<(), CheckpointError> {
        checkpoint.validate()?;

        for state in [&checkpoint.initial_state, &checkpoint.current_state] {
            if !self.is_registered(state) {
                return Err(CheckpointError::ValidationFailed(format!(
                    "state {state:?} is not registered in this machine"
                )));
            }
        }

        info!(
            "restoring checkpoint {} at state {}",
            checkpoint.id,
            checkpoint.current_state.name()
        );

        self.initial = checkpoint.initial_state;
        self.current = checkpoint.current_state;
        self.history = if self.config.record_history {
            checkpoint.history.with_new_limit(self.config.history_limit)
        } else {
            self.config.empty_log()
        };
        self.metadata = checkpoint.metadata;
        self.watch.publish(self.current.clone());

        Ok(())
    }
}

impl<S: State, T: Trigger> std::fmt::Debug for StateMachine<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("initial", &self.initial)
            .field("states", &self.states.len())
            .field("history", &self.history.len())
            .finish()
    }
}
