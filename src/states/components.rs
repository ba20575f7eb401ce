//! States domain: the movement state machine and its snapshot context.

use bevy::prelude::*;

use crate::fsm::{StateMachine, StateNode, Transitions};
use crate::jump::JumpPhase;

/// Horizontal speed below which the character reads as idle.
const RUN_EPSILON: f32 = 1.0;

/// The movement states a character can be in. The machine observes the
/// handlers; it never drives physics itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterState {
    Idle,
    Run,
    Jump,
    Fall,
    Dash,
    WallSlide,
    WallJump,
}

/// Per-tick snapshot of everything the movement states discriminate on,
/// copied out of the handler components by the driving system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsmSnapshot {
    pub grounded: bool,
    pub dashing: bool,
    pub wall_sliding: bool,
    /// Wall-jump input lock still counting down.
    pub wall_locked: bool,
    pub phase: JumpPhase,
    pub velocity: Vec2,
}

impl FsmSnapshot {
    fn running(&self) -> bool {
        self.velocity.x.abs() > RUN_EPSILON
    }

    fn rising(&self) -> bool {
        matches!(self.phase, JumpPhase::Rising | JumpPhase::Apex)
    }

    /// Target for any state that defers to the dominant condition. Order
    /// matters: dash beats wall contact beats airborne beats ground.
    fn dominant(&self) -> CharacterState {
        if self.dashing {
            CharacterState::Dash
        } else if self.wall_sliding {
            CharacterState::WallSlide
        } else if !self.grounded {
            if self.wall_locked {
                CharacterState::WallJump
            } else if self.rising() {
                CharacterState::Jump
            } else {
                CharacterState::Fall
            }
        } else if self.running() {
            CharacterState::Run
        } else {
            CharacterState::Idle
        }
    }
}

/// Per-character movement machine. The initial state is `Idle`; the
/// driving system feeds a fresh [`FsmSnapshot`] every logic tick and
/// drains the recorded transitions into events.
#[derive(Component)]
pub struct CharacterFsm {
    pub machine: StateMachine<CharacterState, FsmSnapshot>,
}

impl Default for CharacterFsm {
    fn default() -> Self {
        let mut machine = StateMachine::new();
        let mut ctx = FsmSnapshot::default();

        // Every state requests the dominant condition's state; the machine
        // drops same-state requests, so only real changes transition.
        for tag in [
            CharacterState::Idle,
            CharacterState::Run,
            CharacterState::Jump,
            CharacterState::Fall,
            CharacterState::Dash,
            CharacterState::WallSlide,
            CharacterState::WallJump,
        ] {
            machine.add_state(
                StateNode::new(tag).update(follow_dominant),
                &mut ctx,
            );
        }
        Self { machine }
    }
}

fn follow_dominant(
    snapshot: &mut FsmSnapshot,
    _dt: f32,
    transitions: &mut Transitions<CharacterState>,
) {
    transitions.request(snapshot.dominant());
}
