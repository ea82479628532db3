//! Errors raised while configuring or driving a state machine.

use crate::core::{State, Trigger};
use thiserror::Error;

/// Errors that can occur when configuring or driving a [`StateMachine`].
///
/// All of them describe programmer errors: a misdeclared domain, a
/// transition table that does not match the events fed to it, or a
/// transition toward a state that was never configured.
///
/// [`StateMachine`]: crate::machine::StateMachine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MachineError<S: State, T: Trigger> {
    #[error("Invalid machine configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("Trigger {trigger:?} is not in the {state:?} state's trigger map")]
    UnknownTrigger { trigger: T, state: S },

    #[error("Trigger {trigger:?} is already allowed from state {state:?}")]
    DuplicateTrigger { trigger: T, state: S },

    #[error("Trigger {trigger:?} leads from {from:?} to unregistered state {target:?}")]
    UnknownTargetState { trigger: T, from: S, target: S },
}

impl<S: State, T: Trigger> MachineError<S, T> {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
