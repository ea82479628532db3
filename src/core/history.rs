//! Transition log.
//!
//! Records which trigger moved the machine from which state to which, and
//! when. The log is bounded: once `limit` records are held, the oldest one is
//! dropped for every new record.

use super::state::{State, Trigger};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single performed transition.
///
/// # Example
///
/// ```rust
/// use statecraft::core::TransitionRecord;
/// use statecraft::{state_enum, trigger_enum};
/// use chrono::Utc;
///
/// state_enum! {
///     enum Task { Pending, Running }
/// }
///
/// trigger_enum! {
///     enum TaskEvent { Start }
/// }
///
/// let record = TransitionRecord {
///     sequence: 0,
///     from: Task::Pending,
///     to: Task::Running,
///     trigger: TaskEvent::Start,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.to, Task::Running);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRecord<S: State, T: Trigger> {
    /// Position of this record among every record ever appended
    pub sequence: u64,
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// The trigger that caused the transition
    pub trigger: T,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

/// Bounded, ordered log of performed transitions.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionLog<S: State, T: Trigger> {
    records: VecDeque<TransitionRecord<S, T>>,
    limit: Option<usize>,
    total: u64,
}

impl<S: State, T: Trigger> Default for TransitionLog<S, T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<S: State, T: Trigger> TransitionLog<S, T> {
    /// Create an empty log that keeps at most `limit` records.
    ///
    /// A limit of zero keeps nothing but still counts appended records.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            records: VecDeque::new(),
            limit: Some(limit),
            total: 0,
        }
    }

    /// Create an empty log that never drops records.
    pub fn unbounded() -> Self {
        Self {
            records: VecDeque::new(),
            limit: None,
            total: 0,
        }
    }

    /// Append a transition, stamping it with the next sequence number.
    pub fn record(&mut self, from: S, to: S, trigger: T, timestamp: DateTime<Utc>) {
        let record = TransitionRecord {
            sequence: self.total,
            from,
            to,
            trigger,
            timestamp,
        };
        self.total += 1;

        if self.limit == Some(0) {
            return;
        }

        self.records.push_back(record);
        self.trim();
    }

    /// Apply a new limit, dropping the oldest records that no longer fit.
    ///
    /// The sequence counter is kept, so later records continue the
    /// numbering.
    pub(crate) fn with_new_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self.trim();
        self
    }

    fn trim(&mut self) {
        if let Some(limit) = self.limit {
            while self.records.len() > limit {
                self.records.pop_front();
            }
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained record followed by
    /// the `to` state of each record.
    pub fn path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(&first.from);
        }
        path.extend(self.records.iter().map(|record| &record.to));
        path
    }

    /// Time between the oldest and newest retained record.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Retained records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord<S, T>> {
        self.records.iter()
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&TransitionRecord<S, T>> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records ever appended, including dropped ones.
    pub fn total_recorded(&self) -> u64 {
        self.total
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Drop every retained record. The sequence counter keeps running.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Whether the retained records form one connected path.
    pub(crate) fn is_connected(&self) -> bool {
        self.records
            .iter()
            .zip(self.records.iter().skip(1))
            .all(|(earlier, later)| earlier.to == later.from)
    }
}
