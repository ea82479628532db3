//! Builder API for ergonomic state machine construction.
//!
//! This module provides a fluent builder, the runtime configuration it
//! applies, and macros that declare state and trigger enums with minimal
//! boilerplate.

pub mod config;
pub mod machine;
pub mod macros;

pub use config::{MachineConfig, DEFAULT_HISTORY_LIMIT};
pub use machine::StateMachineBuilder;
