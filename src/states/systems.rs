//! States domain: the system driving each character's movement machine.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::actor::CharacterBody;
use crate::detect::GroundContact;
use crate::jump::JumpState;
use crate::motion::{DashHandler, WallHandler, WallJumpLock};
use crate::states::{
    CharacterFsm, FsmSnapshot, StateChangedEvent, StateEnteredEvent, StateExitedEvent,
};

/// Snapshot the handlers, tick the machine, and forward any recorded
/// transitions as events.
pub(crate) fn drive_character_fsm(
    time: Res<Time>,
    mut changed: MessageWriter<StateChangedEvent>,
    mut entered: MessageWriter<StateEnteredEvent>,
    mut exited: MessageWriter<StateExitedEvent>,
    mut query: Query<
        (
            Entity,
            &GroundContact,
            &DashHandler,
            &WallHandler,
            &WallJumpLock,
            &JumpState,
            &LinearVelocity,
            &mut CharacterFsm,
        ),
        With<CharacterBody>,
    >,
) {
    let dt = time.delta_secs();

    for (entity, contact, dash, wall, lock, jump, velocity, mut fsm) in &mut query {
        let mut snapshot = FsmSnapshot {
            grounded: contact.grounded,
            dashing: dash.dashing,
            wall_sliding: wall.sliding,
            wall_locked: lock.is_locked(),
            phase: jump.phase,
            velocity: velocity.0,
        };

        fsm.machine.tick(dt, &mut snapshot);

        for transition in fsm.machine.drain_transitions() {
            debug!(
                "movement state {:?} -> {:?}",
                transition.from, transition.to
            );
            if let Some(from) = transition.from {
                exited.write(StateExitedEvent {
                    entity,
                    state: from,
                });
            }
            entered.write(StateEnteredEvent {
                entity,
                state: transition.to,
            });
            changed.write(StateChangedEvent {
                entity,
                from: transition.from,
                to: transition.to,
            });
        }
    }
}
