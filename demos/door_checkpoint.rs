//! Door Checkpoint
//!
//! This example saves a machine's position and resumes it on a new machine.
//!
//! Key concepts:
//! - Declarative construction with the builder
//! - Eager validation of transition targets
//! - JSON checkpoints for readability, binary for compactness
//! - Restoring a position without replaying entry callbacks
//!
//! Run with: cargo run --example door_checkpoint

use statecraft::{
    state_enum, trigger_enum, Checkpoint, MachineError, StateMachine, StateMachineBuilder,
};

state_enum! {
    enum Door {
        Open,
        Closed,
        Locked,
    }
}

trigger_enum! {
    enum Action {
        Open,
        Close,
        Lock,
        Unlock,
    }
}

fn door() -> Result<StateMachine<Door, Action>, MachineError<Door, Action>> {
    StateMachineBuilder::new()
        .initial(Door::Open)
        .history_limit(32)
        .state(Door::Open, |s| {
            s.allow(Action::Close, Door::Closed)?;
            Ok(())
        })
        .state(Door::Closed, |s| {
            s.allow(Action::Open, Door::Open)?
                .allow(Action::Lock, Door::Locked)?;
            Ok(())
        })
        .state(Door::Locked, |s| {
            s.allow(Action::Unlock, Door::Closed)?
                .set_on_entry(|from| println!("  click (locked from {from:?})"));
            Ok(())
        })
        .validate_targets(true)
        .build()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Door Checkpoint Example ===\n");

    let mut front = door()?;
    front.perform_transition(Action::Close)?;
    front.perform_transition(Action::Lock)?;
    println!("Front door is {:?}", front.current_state());

    let checkpoint = front.checkpoint();
    let json = checkpoint.to_json()?;
    let bytes = checkpoint.to_bytes()?;
    println!("\nCheckpoint {}:", checkpoint.id);
    println!("  JSON:   {} bytes", json.len());
    println!("  binary: {} bytes", bytes.len());

    let mut resumed = door()?;
    resumed.restore(Checkpoint::from_bytes(&bytes)?)?;
    println!("\nResumed door is {:?}", resumed.current_state());
    println!("Transitions so far: {}", resumed.metadata().transition_count);

    resumed.perform_transition(Action::Unlock)?;
    resumed.perform_transition(Action::Open)?;
    println!("Resumed door is {:?}", resumed.current_state());
    println!("Path: {:?}", resumed.history().path());

    println!("\n=== Example Complete ===");
    Ok(())
}
