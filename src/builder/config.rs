//! Runtime configuration for a state machine.

use crate::core::{State, TransitionLog, Trigger};
use serde::{Deserialize, Serialize};

/// Default number of transitions kept in the log.
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// Runtime options applied when a machine is created.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```rust
/// use statecraft::builder::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "history_limit": 16 }"#).unwrap();
/// assert!(config.record_history);
/// assert_eq!(config.history_limit, Some(16));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Append every performed transition to the machine's log
    pub record_history: bool,

    /// Number of log records kept; `None` keeps all of them
    pub history_limit: Option<usize>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            record_history: true,
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
        }
    }
}

impl MachineConfig {
    /// Parse a configuration from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// An empty transition log bounded by `history_limit`.
    pub(crate) fn empty_log<S: State, T: Trigger>(&self) -> TransitionLog<S, T> {
        match self.history_limit {
            Some(limit) => TransitionLog::with_limit(limit),
            None => TransitionLog::unbounded(),
        }
    }
}
