//! Checkpoint and resume for state machines.
//!
//! A checkpoint captures where a machine is (current state, transition log,
//! counters) but not how it is configured: transition tables and callbacks
//! are code. Restore a checkpoint onto a machine configured the same way as
//! the one it was taken from.
//!
//! # Example
//!
//! ```rust
//! use statecraft::checkpoint::Checkpoint;
//! use statecraft::machine::StateMachine;
//! use statecraft::{state_enum, trigger_enum};
//!
//! state_enum! {
//!     enum Door { Open, Closed }
//! }
//!
//! trigger_enum! {
//!     enum Action { Close, Open }
//! }
//!
//! fn door() -> StateMachine<Door, Action> {
//!     let mut machine = StateMachine::new(Door::Open).unwrap();
//!     machine.configure_state(Door::Open).allow(Action::Close, Door::Closed).unwrap();
//!     machine.configure_state(Door::Closed).allow(Action::Open, Door::Open).unwrap();
//!     machine
//! }
//!
//! let mut running = door();
//! running.perform_transition(Action::Close).unwrap();
//! let json = running.checkpoint().to_json().unwrap();
//!
//! let mut resumed = door();
//! resumed.restore(Checkpoint::from_json(&json).unwrap()).unwrap();
//! assert_eq!(resumed.current_state(), &Door::Closed);
//! ```

use crate::core::{State, TransitionLog, Trigger};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Counters tracked by a state machine
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineMetadata {
    /// When machine was created
    pub created_at: DateTime<Utc>,

    /// Last transition time
    pub updated_at: DateTime<Utc>,

    /// Transitions performed since creation
    pub transition_count: u64,

    /// Transitions performed per trigger name
    pub trigger_counts: HashMap<String, u64>,
}

impl Default for MachineMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            transition_count: 0,
            trigger_counts: HashMap::new(),
        }
    }
}

impl MachineMetadata {
    pub(crate) fn note_transition(&mut self, trigger: &str, at: DateTime<Utc>) {
        self.updated_at = at;
        self.transition_count += 1;
        *self.trigger_counts.entry(trigger.to_string()).or_insert(0) += 1;
    }
}

/// Serializable checkpoint of a state machine's runtime position.
/// Does NOT include transition tables or callbacks.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<S: State, T: Trigger> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Initial state of the machine
    pub initial_state: S,

    /// Current state of the machine
    pub current_state: S,

    /// Retained transition log
    pub history: TransitionLog<S, T>,

    /// Machine counters
    pub metadata: MachineMetadata,
}

impl<S: State, T: Trigger> Checkpoint<S, T> {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Check that the checkpoint is internally consistent.
    ///
    /// The version must be supported, the retained log must form one
    /// connected path, and that path must end in the current state.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        if !self.history.is_connected() {
            return Err(CheckpointError::ValidationFailed(
                "transition log is not a connected path".to_string(),
            ));
        }

        if let Some(last) = self.history.last() {
            if last.to != self.current_state {
                return Err(CheckpointError::ValidationFailed(format!(
                    "transition log ends in {:?} but current state is {:?}",
                    last.to, self.current_state
                )));
            }
        }

        Ok(())
    }
}
