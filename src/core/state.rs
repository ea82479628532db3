//! Closed identifier domains for states and triggers.
//!
//! A machine is keyed by two finite, comparable domains: the states it can be
//! in and the triggers it reacts to. Both traits expose the full list of
//! values so the machine can check the domain before it starts.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state identifiers.
///
/// Implementors are usually fieldless enums. Every value the machine may be
/// asked about must appear in [`State::variants`].
///
/// # Required Traits
///
/// - `Clone`: identifiers are copied into transition tables and the log
/// - `Eq` + `Hash`: identifiers key the state registry
/// - `Debug`: identifiers appear in errors and log lines
/// - `Serialize` + `Deserialize`: identifiers are written into checkpoints
///
/// # Example
///
/// ```rust
/// use statecraft::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
///
///     fn variants() -> &'static [Self] {
///         &[Self::Open, Self::Closed]
///     }
/// }
///
/// assert_eq!(Door::variants().len(), 2);
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Every value of the domain, each listed once.
    fn variants() -> &'static [Self];
}

/// Trait for trigger identifiers.
///
/// Triggers are scoped per state: the same trigger may lead to different
/// targets, or nowhere, depending on the state it is fired in.
pub trait Trigger:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the trigger's name for display/logging.
    fn name(&self) -> &str;

    /// Every value of the domain, each listed once.
    fn variants() -> &'static [Self];
}

/// Check that a domain is non-empty and lists every value once.
///
/// Returns a human readable reason on failure.
pub(crate) fn check_domain<V: Eq + Hash + Debug>(kind: &str, variants: &[V]) -> Result<(), String> {
    if variants.is_empty() {
        return Err(format!("{kind} domain has no values"));
    }

    let mut seen = HashSet::with_capacity(variants.len());
    for value in variants {
        if !seen.insert(value) {
            return Err(format!("{kind} domain lists {value:?} more than once"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Running,
        Stopped,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Running => "Running",
                Self::Stopped => "Stopped",
            }
        }

        fn variants() -> &'static [Self] {
            &[Self::Idle, Self::Running, Self::Stopped]
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Idle.name(), "Idle");
        assert_eq!(TestState::Running.name(), "Running");
        assert_eq!(TestState::Stopped.name(), "Stopped");
    }

    #[test]
    fn variants_lists_whole_domain() {
        assert_eq!(
            TestState::variants(),
            &[TestState::Idle, TestState::Running, TestState::Stopped]
        );
    }

    #[test]
    fn check_domain_accepts_unique_values() {
        assert!(check_domain("state", TestState::variants()).is_ok());
    }

    #[test]
    fn check_domain_rejects_empty_domain() {
        let empty: &[TestState] = &[];
        let reason = check_domain("trigger", empty).unwrap_err();
        assert_eq!(reason, "trigger domain has no values");
    }

    #[test]
    fn check_domain_rejects_duplicates() {
        let values = [TestState::Idle, TestState::Running, TestState::Idle];
        let reason = check_domain("state", &values).unwrap_err();
        assert!(reason.contains("Idle"));
    }

    #[test]
    fn state_serializes_correctly() {
        let state = TestState::Running;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
