//! Player Controller
//!
//! This example drives a character controller from a simulated game loop.
//!
//! Key concepts:
//! - Fluent per-state configuration
//! - Entry/exit callbacks that branch on where the machine comes from
//! - Update and fixed update ticks forwarded to the current state
//! - Rejected inputs reported as errors instead of silently ignored
//!
//! Run with: RUST_LOG=debug cargo run --example player_controller

use statecraft::{state_enum, trigger_enum, MachineError, StateMachine};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

state_enum! {
    enum Player {
        Grounded,
        Airborne,
        Stunned,
    }
}

trigger_enum! {
    enum Input {
        Jump,
        Land,
        Hit,
        Recover,
    }
}

fn main() -> Result<(), MachineError<Player, Input>> {
    env_logger::init();

    println!("=== Player Controller Example ===\n");

    let airborne_frames = Arc::new(AtomicU32::new(0));
    let physics_steps = Arc::new(AtomicU32::new(0));

    let mut player = StateMachine::<Player, Input>::new(Player::Grounded)?;
    let watch = player.watch();

    player
        .configure_state(Player::Grounded)
        .allow(Input::Jump, Player::Airborne)?
        .allow(Input::Hit, Player::Stunned)?
        .set_on_entry(|from| println!("  landed (was {from:?})"));

    let frames = Arc::clone(&airborne_frames);
    let steps = Arc::clone(&physics_steps);
    player
        .configure_state(Player::Airborne)
        .allow(Input::Land, Player::Grounded)?
        .allow(Input::Hit, Player::Stunned)?
        .set_on_exit(move |to| println!("  leaving the air for {to:?}"))
        .set_update_method(move || {
            frames.fetch_add(1, Ordering::Relaxed);
        })
        .set_fixed_update_method(move || {
            steps.fetch_add(1, Ordering::Relaxed);
        });

    player
        .configure_state(Player::Stunned)
        .allow(Input::Recover, Player::Grounded)?
        .set_on_entry(move |from| {
            println!("  stunned while {from:?}, watch reads {:?}", watch.current())
        });

    let script = [
        Some(Input::Jump),
        None,
        None,
        Some(Input::Land),
        Some(Input::Land),
        Some(Input::Jump),
        Some(Input::Hit),
        Some(Input::Recover),
    ];

    for (frame, input) in script.into_iter().enumerate() {
        if let Some(input) = input {
            match player.perform_transition(input) {
                Ok(()) => println!("frame {frame}: {input:?} -> {:?}", player.current_state()),
                Err(error) => println!("frame {frame}: rejected ({error})"),
            }
        }
        player.update();
        player.fixed_update();
    }

    println!();
    println!(
        "Airborne update ticks: {}",
        airborne_frames.load(Ordering::Relaxed)
    );
    println!(
        "Airborne physics steps: {}",
        physics_steps.load(Ordering::Relaxed)
    );
    println!("Path: {:?}", player.history().path());

    println!("\n=== Example Complete ===");
    Ok(())
}
