//! Statecraft: an embeddable trigger-driven state machine
//!
//! A machine holds exactly one current state out of a closed set of states.
//! Each state declares which triggers it reacts to and where they lead, plus
//! optional callbacks run on entry, on exit, and on every update or fixed
//! update tick driven by the host application.
//!
//! # Core Concepts
//!
//! - **State / Trigger**: closed identifier domains, usually declared with
//!   [`state_enum!`] and [`trigger_enum!`]
//! - **StateDefinition**: per-state transition table and callbacks,
//!   configured through chaining methods
//! - **StateMachine**: owns the definitions, performs transitions and
//!   forwards update ticks
//! - **Checkpoint**: serializable snapshot of where a machine is
//!
//! # Example
//!
//! ```rust
//! use statecraft::{state_enum, trigger_enum, StateMachine};
//! use std::sync::{Arc, Mutex};
//!
//! state_enum! {
//!     enum Activity {
//!         Idle,
//!         Running,
//!     }
//! }
//!
//! trigger_enum! {
//!     enum Input {
//!         Start,
//!         Stop,
//!     }
//! }
//!
//! let entered_from = Arc::new(Mutex::new(None));
//! let seen = Arc::clone(&entered_from);
//!
//! let mut machine = StateMachine::new(Activity::Idle).unwrap();
//! machine
//!     .configure_state(Activity::Idle)
//!     .allow(Input::Start, Activity::Running)
//!     .unwrap();
//! machine
//!     .configure_state(Activity::Running)
//!     .allow(Input::Stop, Activity::Idle)
//!     .unwrap()
//!     .set_on_entry(move |from| *seen.lock().unwrap() = Some(*from));
//!
//! machine.perform_transition(Input::Start).unwrap();
//! assert_eq!(machine.current_state(), &Activity::Running);
//! assert_eq!(*entered_from.lock().unwrap(), Some(Activity::Idle));
//!
//! machine.perform_transition(Input::Stop).unwrap();
//! assert_eq!(machine.current_state(), &Activity::Idle);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::{MachineConfig, StateMachineBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use core::{State, TransitionLog, TransitionRecord, Trigger};
pub use machine::{MachineError, StateDefinition, StateMachine, StateWatch};
