//! End-to-end scenarios driving a machine through its public API.

use statecraft::{state_enum, trigger_enum, MachineError, StateMachine};
use std::sync::{Arc, Mutex};

state_enum! {
    enum Activity {
        Idle,
        Running,
    }
}

trigger_enum! {
    enum Input {
        Start,
        Stop,
    }
}

fn idle_running(entries: Arc<Mutex<Vec<Activity>>>) -> StateMachine<Activity, Input> {
    let mut machine = StateMachine::new(Activity::Idle).unwrap();
    machine
        .configure_state(Activity::Idle)
        .allow(Input::Start, Activity::Running)
        .unwrap();
    machine
        .configure_state(Activity::Running)
        .allow(Input::Stop, Activity::Idle)
        .unwrap()
        .set_on_entry(move |from| entries.lock().unwrap().push(*from));
    machine
}

#[test]
fn start_stop_round_trip() {
    let entries = Arc::new(Mutex::new(Vec::new()));
    let mut machine = idle_running(Arc::clone(&entries));

    machine.perform_transition(Input::Start).unwrap();
    assert_eq!(machine.current_state(), &Activity::Running);
    assert_eq!(*entries.lock().unwrap(), vec![Activity::Idle]);

    machine.perform_transition(Input::Stop).unwrap();
    assert_eq!(machine.current_state(), &Activity::Idle);

    machine.perform_transition(Input::Start).unwrap();
    assert_eq!(machine.current_state(), &Activity::Running);
    assert_eq!(
        *entries.lock().unwrap(),
        vec![Activity::Idle, Activity::Idle]
    );
}

#[test]
fn unregistered_trigger_is_reported() {
    let entries = Arc::new(Mutex::new(Vec::new()));
    let mut machine = idle_running(Arc::clone(&entries));

    let error = machine.perform_transition(Input::Stop).unwrap_err();

    assert_eq!(
        error,
        MachineError::UnknownTrigger {
            trigger: Input::Stop,
            state: Activity::Idle,
        }
    );
    assert_eq!(machine.current_state(), &Activity::Idle);
    assert!(entries.lock().unwrap().is_empty());
}

#[test]
fn duplicate_allow_is_a_configuration_error() {
    let mut machine: StateMachine<Activity, Input> = StateMachine::new(Activity::Idle).unwrap();
    machine
        .configure_state(Activity::Idle)
        .allow(Input::Start, Activity::Running)
        .unwrap();

    let error = machine
        .configure_state(Activity::Idle)
        .allow(Input::Start, Activity::Idle)
        .unwrap_err();

    assert_eq!(
        error,
        MachineError::DuplicateTrigger {
            trigger: Input::Start,
            state: Activity::Idle,
        }
    );
}

#[test]
fn transition_to_unconfigured_state_fails() {
    let mut machine: StateMachine<Activity, Input> = StateMachine::new(Activity::Idle).unwrap();
    machine
        .configure_state(Activity::Idle)
        .allow(Input::Start, Activity::Running)
        .unwrap();

    let error = machine.perform_transition(Input::Start).unwrap_err();

    assert!(matches!(
        error,
        MachineError::UnknownTargetState {
            target: Activity::Running,
            ..
        }
    ));
    assert_eq!(machine.current_state(), &Activity::Idle);
}

#[test]
fn ticks_follow_the_current_state() {
    let ticks = Arc::new(Mutex::new(Vec::new()));
    let mut machine = idle_running(Arc::new(Mutex::new(Vec::new())));

    let idle = Arc::clone(&ticks);
    machine
        .configure_state(Activity::Idle)
        .set_update_method(move || idle.lock().unwrap().push("idle"));
    let running = Arc::clone(&ticks);
    machine
        .configure_state(Activity::Running)
        .set_update_method(move || running.lock().unwrap().push("running"))
        .set_fixed_update_method(|| {});

    machine.update();
    machine.perform_transition(Input::Start).unwrap();
    machine.update();
    machine.fixed_update();
    machine.perform_transition(Input::Stop).unwrap();
    machine.update();

    assert_eq!(*ticks.lock().unwrap(), vec!["idle", "running", "idle"]);
}

#[test]
fn exit_observes_old_state_and_entry_observes_new() {
    let mut machine: StateMachine<Activity, Input> = StateMachine::new(Activity::Idle).unwrap();
    let observed = Arc::new(Mutex::new(Vec::new()));

    let watch = machine.watch();
    let on_exit = Arc::clone(&observed);
    machine
        .configure_state(Activity::Idle)
        .allow(Input::Start, Activity::Running)
        .unwrap()
        .set_on_exit(move |_| on_exit.lock().unwrap().push(("exit", watch.current())));

    let watch = machine.watch();
    let on_entry = Arc::clone(&observed);
    machine
        .configure_state(Activity::Running)
        .set_on_entry(move |_| on_entry.lock().unwrap().push(("entry", watch.current())));

    machine.perform_transition(Input::Start).unwrap();

    assert_eq!(
        *observed.lock().unwrap(),
        vec![("exit", Activity::Idle), ("entry", Activity::Running)]
    );
}

#[test]
fn machine_can_be_shared_behind_a_mutex() {
    let machine = Arc::new(Mutex::new(idle_running(Arc::new(Mutex::new(Vec::new())))));

    let worker = {
        let machine = Arc::clone(&machine);
        std::thread::spawn(move || {
            machine
                .lock()
                .unwrap()
                .perform_transition(Input::Start)
                .unwrap();
        })
    };
    worker.join().unwrap();

    assert_eq!(
        machine.lock().unwrap().current_state(),
        &Activity::Running
    );
}

#[test]
fn checkpoint_resumes_on_fresh_machine() {
    let mut original = idle_running(Arc::new(Mutex::new(Vec::new())));
    original.perform_transition(Input::Start).unwrap();

    let bytes = original.checkpoint().to_bytes().unwrap();

    let entries = Arc::new(Mutex::new(Vec::new()));
    let mut resumed = idle_running(Arc::clone(&entries));
    resumed
        .restore(statecraft::Checkpoint::from_bytes(&bytes).unwrap())
        .unwrap();

    assert_eq!(resumed.current_state(), &Activity::Running);
    assert!(entries.lock().unwrap().is_empty());

    resumed.perform_transition(Input::Stop).unwrap();
    assert_eq!(
        resumed.history().path(),
        vec![&Activity::Idle, &Activity::Running, &Activity::Idle]
    );
}
