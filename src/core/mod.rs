//! Core identifier traits and transition records.
//!
//! This module contains the types every machine is built from:
//! - State and trigger domains via the `State` and `Trigger` traits
//! - The bounded log of performed transitions

pub(crate) mod history;
pub(crate) mod state;

pub use history::{TransitionLog, TransitionRecord};
pub use state::{State, Trigger};
