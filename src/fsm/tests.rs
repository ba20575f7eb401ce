//! Unit tests for the state machine engine.

use super::{StateMachine, StateNode, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Phase {
    A,
    B,
    C,
}

/// Shared scratch context recording callback order.
#[derive(Default)]
struct Log {
    entries: Vec<String>,
}

impl Log {
    fn push(&mut self, entry: &str) {
        self.entries.push(entry.to_string());
    }
}

fn logged_state(tag: Phase, name: &'static str) -> StateNode<Phase, Log> {
    StateNode::new(tag)
        .enter(move |log: &mut Log| log.push(&format!("enter {name}")))
        .exit(move |log: &mut Log| log.push(&format!("exit {name}")))
}

#[test]
fn test_first_state_added_becomes_current_with_synthetic_entry() {
    let mut log = Log::default();
    let mut machine = StateMachine::new();
    machine.add_state(logged_state(Phase::A, "a"), &mut log);
    machine.add_state(logged_state(Phase::B, "b"), &mut log);

    assert_eq!(machine.current(), Some(Phase::A));
    assert_eq!(log.entries, vec!["enter a"]);
    assert_eq!(
        machine.drain_transitions(),
        vec![Transition {
            from: None,
            to: Phase::A
        }]
    );
}

#[test]
fn test_transition_runs_exit_before_enter_exactly_once() {
    let mut log = Log::default();
    let mut machine = StateMachine::new();
    machine.add_state(logged_state(Phase::A, "a"), &mut log);
    machine.add_state(logged_state(Phase::B, "b"), &mut log);
    machine.drain_transitions();

    assert!(machine.change_state(Phase::B, &mut log));
    assert_eq!(log.entries, vec!["enter a", "exit a", "enter b"]);
    assert_eq!(
        machine.drain_transitions(),
        vec![Transition {
            from: Some(Phase::A),
            to: Phase::B
        }]
    );
}

#[test]
fn test_invalid_transitions_are_logged_noops() {
    let mut log = Log::default();
    let mut machine = StateMachine::new();
    machine.add_state(logged_state(Phase::A, "a"), &mut log);

    // Unregistered target.
    assert!(!machine.change_state(Phase::C, &mut log));
    // Self-transition.
    assert!(!machine.change_state(Phase::A, &mut log));

    assert_eq!(machine.current(), Some(Phase::A));
    assert_eq!(log.entries, vec!["enter a"]);
}

#[test]
fn test_force_change_permits_reentering_current_state() {
    let mut log = Log::default();
    let mut machine = StateMachine::new();
    machine.add_state(logged_state(Phase::A, "a"), &mut log);

    assert!(machine.force_change_state(Phase::A, &mut log));
    assert_eq!(log.entries, vec!["enter a", "exit a", "enter a"]);
}

#[test]
fn test_update_callback_requests_are_applied_after_return() {
    let mut log = Log::default();
    let mut machine = StateMachine::new();
    machine.add_state(
        logged_state(Phase::A, "a").update(|log: &mut Log, _dt, transitions| {
            log.push("update a");
            transitions.request(Phase::B);
        }),
        &mut log,
    );
    machine.add_state(logged_state(Phase::B, "b"), &mut log);

    machine.tick(0.016, &mut log);
    assert_eq!(machine.current(), Some(Phase::B));
    assert_eq!(log.entries, vec!["enter a", "update a", "exit a", "enter b"]);
}

#[test]
fn test_only_first_valid_request_wins_per_tick() {
    let mut log = Log::default();
    let mut machine = StateMachine::new();
    machine.add_state(
        logged_state(Phase::A, "a").update(|_log, _dt, transitions| {
            transitions.request(Phase::B);
            transitions.request(Phase::C);
        }),
        &mut log,
    );
    machine.add_state(logged_state(Phase::B, "b"), &mut log);
    machine.add_state(logged_state(Phase::C, "c"), &mut log);

    machine.tick(0.016, &mut log);
    assert_eq!(machine.current(), Some(Phase::B));
}

#[test]
fn test_physics_tick_uses_the_physics_callback() {
    let mut log = Log::default();
    let mut machine = StateMachine::new();
    machine.add_state(
        logged_state(Phase::A, "a")
            .update(|log: &mut Log, _dt, _t| log.push("logic a"))
            .physics(|log: &mut Log, _dt, transitions| {
                log.push("physics a");
                transitions.request(Phase::B);
            }),
        &mut log,
    );
    machine.add_state(logged_state(Phase::B, "b"), &mut log);

    machine.physics_tick(1.0 / 50.0, &mut log);
    assert_eq!(machine.current(), Some(Phase::B));
    assert_eq!(
        log.entries,
        vec!["enter a", "physics a", "exit a", "enter b"]
    );
}

#[test]
fn test_remove_state_refuses_current() {
    let mut log = Log::default();
    let mut machine = StateMachine::new();
    machine.add_state(logged_state(Phase::A, "a"), &mut log);
    machine.add_state(logged_state(Phase::B, "b"), &mut log);

    machine.remove_state(Phase::A);
    assert!(machine.contains(Phase::A));

    machine.remove_state(Phase::B);
    assert!(!machine.contains(Phase::B));
}

#[test]
fn test_dispose_exits_current_and_aggregates_failures() {
    let mut log = Log::default();
    let mut machine = StateMachine::new();
    machine.add_state(
        logged_state(Phase::A, "a").dispose(|log: &mut Log| {
            log.push("dispose a");
            Err("a broke".to_string())
        }),
        &mut log,
    );
    machine.add_state(
        logged_state(Phase::B, "b").dispose(|log: &mut Log| {
            log.push("dispose b");
            Ok(())
        }),
        &mut log,
    );
    machine.add_state(
        logged_state(Phase::C, "c").dispose(|log: &mut Log| {
            log.push("dispose c");
            Err("c broke".to_string())
        }),
        &mut log,
    );

    let err = machine.dispose(&mut log).unwrap_err();

    // Every dispose ran despite the first failure, in registration order.
    assert_eq!(
        log.entries,
        vec!["enter a", "exit a", "dispose a", "dispose b", "dispose c"]
    );
    assert_eq!(err.failures.len(), 2);
    assert_eq!(err.failures[0].0, Phase::A);
    assert_eq!(err.failures[1].0, Phase::C);
}

#[test]
fn test_duplicate_add_is_ignored() {
    let mut log = Log::default();
    let mut machine = StateMachine::new();
    machine.add_state(logged_state(Phase::A, "a"), &mut log);
    machine.add_state(logged_state(Phase::A, "a2"), &mut log);

    assert_eq!(machine.current(), Some(Phase::A));
    assert_eq!(log.entries, vec!["enter a"]);
}
