//! Builder for constructing state machines.

use crate::builder::config::MachineConfig;
use crate::core::{State, Trigger};
use crate::machine::{MachineError, StateDefinition, StateMachine};
use stillwater::validation::Validation;

/// Deferred configuration of one state.
type Configure<S, T> =
    Box<dyn FnOnce(&mut StateDefinition<S, T>) -> Result<(), MachineError<S, T>>>;

/// Builder for constructing state machines with a fluent API.
///
/// # Example
///
/// ```rust
/// use statecraft::builder::StateMachineBuilder;
/// use statecraft::{state_enum, trigger_enum};
///
/// state_enum! {
///     enum Light { Red, Green, Yellow }
/// }
///
/// trigger_enum! {
///     enum Tick { Next }
/// }
///
/// let mut light = StateMachineBuilder::new()
///     .initial(Light::Red)
///     .state(Light::Red, |s| s.allow(Tick::Next, Light::Green).map(|_| ()))
///     .state(Light::Green, |s| s.allow(Tick::Next, Light::Yellow).map(|_| ()))
///     .state(Light::Yellow, |s| s.allow(Tick::Next, Light::Red).map(|_| ()))
///     .validate_targets(true)
///     .build()
///     .unwrap();
///
/// light.perform_transition(Tick::Next).unwrap();
/// assert_eq!(light.current_state(), &Light::Green);
/// ```
pub struct StateMachineBuilder<S: State, T: Trigger> {
    initial: Option<S>,
    config: MachineConfig,
    states: Vec<(S, Configure<S, T>)>,
    validate_targets: bool,
}

impl<S: State, T: Trigger> StateMachineBuilder<S, T> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            config: MachineConfig::default(),
            states: Vec::new(),
            validate_targets: false,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Replace the whole runtime configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Keep at most `limit` transitions in the log.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = Some(limit);
        self
    }

    /// Turn the transition log on or off.
    pub fn record_history(mut self, enabled: bool) -> Self {
        self.config.record_history = enabled;
        self
    }

    /// Register `id` and configure it when the machine is built.
    ///
    /// States may be named more than once; their configurations are applied
    /// in order to the same definition.
    pub fn state<F>(mut self, id: S, configure: F) -> Self
    where
        F: FnOnce(&mut StateDefinition<S, T>) -> Result<(), MachineError<S, T>> + 'static,
    {
        self.states.push((id, Box::new(configure)));
        self
    }

    /// Reject machines with transitions toward unregistered states at build
    /// time instead of at transition time.
    pub fn validate_targets(mut self, enabled: bool) -> Self {
        self.validate_targets = enabled;
        self
    }

    /// Build the state machine.
    /// Returns an error if required fields are missing or a state fails to configure.
    pub fn build(self) -> Result<StateMachine<S, T>, MachineError<S, T>> {
        let initial = self.initial.ok_or_else(|| {
            MachineError::invalid("initial state not specified. Call .initial(state) before .build()")
        })?;

        let mut machine = StateMachine::with_config(initial, self.config)?;
        for (id, configure) in self.states {
            configure(machine.configure_state(id))?;
        }

        if self.validate_targets {
            if let Validation::Failure(errors) = machine.validate() {
                let dangling: Vec<String> = errors.iter().map(ToString::to_string).collect();
                return Err(MachineError::invalid(dangling.join("; ")));
            }
        }

        Ok(machine)
    }
}

impl<S: State, T: Trigger> Default for StateMachineBuilder<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    crate::trigger_enum! {
        enum TestTrigger {
            Begin,
            Finish,
        }
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = StateMachineBuilder::<TestState, TestTrigger>::new().build();

        assert!(matches!(
            result,
            Err(MachineError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn fluent_api_builds_machine() {
        let mut machine = StateMachineBuilder::new()
            .initial(TestState::Initial)
            .state(TestState::Initial, |s| {
                s.allow(TestTrigger::Begin, TestState::Processing)?;
                Ok(())
            })
            .state(TestState::Processing, |s| {
                s.allow(TestTrigger::Finish, TestState::Complete)?;
                Ok(())
            })
            .state(TestState::Complete, |_| Ok(()))
            .build()
            .unwrap();

        machine.perform_transition(TestTrigger::Begin).unwrap();
        machine.perform_transition(TestTrigger::Finish).unwrap();
        assert_eq!(machine.current_state(), &TestState::Complete);
    }

    #[test]
    fn configuration_errors_are_returned() {
        let result = StateMachineBuilder::new()
            .initial(TestState::Initial)
            .state(TestState::Initial, |s| {
                s.allow(TestTrigger::Begin, TestState::Processing)?;
                Ok(())
            })
            .state(TestState::Initial, |s| {
                s.allow(TestTrigger::Begin, TestState::Complete)?;
                Ok(())
            })
            .build();

        assert!(matches!(
            result,
            Err(MachineError::DuplicateTrigger {
                trigger: TestTrigger::Begin,
                state: TestState::Initial,
            })
        ));
    }

    #[test]
    fn target_validation_lists_every_dangling_transition() {
        let result = StateMachineBuilder::new()
            .initial(TestState::Initial)
            .state(TestState::Initial, |s| {
                s.allow(TestTrigger::Begin, TestState::Processing)?
                    .allow(TestTrigger::Finish, TestState::Complete)?;
                Ok(())
            })
            .validate_targets(true)
            .build();

        match result {
            Err(MachineError::InvalidConfiguration { reason }) => {
                assert!(reason.contains("Processing"));
                assert!(reason.contains("Complete"));
            }
            other => panic!("Expected invalid configuration, got {other:?}"),
        }
    }

    #[test]
    fn dangling_targets_allowed_without_validation() {
        let machine = StateMachineBuilder::new()
            .initial(TestState::Initial)
            .state(TestState::Initial, |s| {
                s.allow(TestTrigger::Begin, TestState::Processing)?;
                Ok(())
            })
            .build();

        assert!(machine.is_ok());
    }

    #[test]
    fn history_options_reach_machine() {
        let machine = StateMachineBuilder::<TestState, TestTrigger>::new()
            .initial(TestState::Initial)
            .history_limit(4)
            .record_history(false)
            .build()
            .unwrap();

        assert_eq!(machine.config().history_limit, Some(4));
        assert!(!machine.config().record_history);
        assert_eq!(machine.history().limit(), Some(4));
    }
}
