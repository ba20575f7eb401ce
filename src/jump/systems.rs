//! Jump domain: timer stamping, buffered execution, variable jump height,
//! and jump-phase tracking.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::actor::{CharacterBody, Facing};
use crate::config::{JumpTuning, WallTuning};
use crate::detect::{GroundContact, GroundEnteredEvent, WallContactState, WallSide};
use crate::gravity::{GravityRegime, GravityState, GravityTuning};
use crate::input::ControlIntent;
use crate::jump::{JumpActions, JumpContext, JumpExecutedEvent, JumpPhase, JumpState};
use crate::motion::WallJumpLock;
use crate::velocity::{Priority, VelocityPipeline, VelocityRequest};

/// Stamp the derived timers and latch buffered input.
///
/// Coyote and wall-coyote stamps refresh every tick contact holds, so the
/// windows measure time since contact was *lost*. Landing resets the air
/// jump pool and the gravity regime.
pub(crate) fn update_jump_timers(
    time: Res<Time>,
    tuning: Res<JumpTuning>,
    mut intent: ResMut<ControlIntent>,
    mut landings: MessageReader<GroundEnteredEvent>,
    mut query: Query<
        (
            Entity,
            &GroundContact,
            &WallContactState,
            &mut JumpState,
            &mut GravityState,
        ),
        With<CharacterBody>,
    >,
) {
    let now = time.elapsed_secs_f64();
    let landed: Vec<Entity> = landings.read().map(|event| event.entity).collect();

    for (entity, contact, wall, mut state, mut gravity) in &mut query {
        if contact.grounded {
            state.coyote.mark(now);
        }
        if wall.side != WallSide::None {
            state.wall_coyote.mark(now);
            state.last_wall_side = wall.side;
        }

        if landed.contains(&entity) {
            state.air_jumps_remaining = tuning.max_air_jumps;
            state.phase = JumpPhase::Grounded;
            state.variable_consumed = true;
            gravity.set_regime(GravityRegime::Normal);
            debug!(
                "landed: air jumps reset to {}",
                state.air_jumps_remaining
            );
        }
    }

    // A press that cannot fire immediately stays buffered; the executor
    // auto-fires it while the window holds.
    if intent.take_jump_pressed() {
        for (_, _, _, mut state, _) in &mut query {
            state.buffer.mark(now);
        }
    }
}

/// Evaluate the action list for every character with an active buffer.
///
/// Exactly one action executes per trigger: the first whose precondition
/// holds. An `execute` failure after a true `can_execute` is a contract
/// violation; it is logged and swallowed so the step continues.
pub(crate) fn execute_buffered_jumps(
    time: Res<Time>,
    tuning: Res<JumpTuning>,
    wall_tuning: Res<WallTuning>,
    mut executed: MessageWriter<JumpExecutedEvent>,
    mut query: Query<
        (
            Entity,
            &GroundContact,
            &WallContactState,
            &LinearVelocity,
            &Facing,
            &JumpActions,
            &mut JumpState,
            &mut VelocityPipeline,
            &mut WallJumpLock,
            &mut GravityState,
        ),
        With<CharacterBody>,
    >,
) {
    let now = time.elapsed_secs_f64();

    for (
        entity,
        contact,
        wall,
        velocity,
        facing,
        actions,
        mut state,
        mut pipeline,
        mut wall_lock,
        mut gravity,
    ) in &mut query
    {
        if !state.buffer.is_within(now, tuning.buffer_time) {
            continue;
        }
        if state.cooldown.is_within(now, tuning.min_jump_interval) {
            continue;
        }

        let mut fired = None;
        {
            let mut ctx = JumpContext {
                now,
                grounded: contact.grounded,
                wall_side: wall.side,
                velocity: velocity.0,
                facing: *facing,
                tuning: &tuning,
                wall_tuning: &wall_tuning,
                state: &mut state,
                pipeline: &mut pipeline,
                wall_lock: &mut wall_lock,
                launch_velocity: Vec2::ZERO,
            };

            for action in &actions.0 {
                if !action.can_execute(&ctx) {
                    continue;
                }
                match action.execute(&mut ctx) {
                    Ok(()) => fired = Some((action.kind(), ctx.launch_velocity)),
                    Err(error) => {
                        error!("jump action broke its contract: {error}");
                    }
                }
                break;
            }
        }

        if let Some((kind, launch_velocity)) = fired {
            state.buffer.clear();
            state.cooldown.mark(now);
            state.phase = JumpPhase::Rising;
            gravity.set_regime(GravityRegime::JumpHold);
            debug!("{kind:?} jump executed at {launch_velocity:?}");
            executed.write(JumpExecutedEvent {
                entity,
                kind,
                velocity: launch_velocity,
            });
        }
    }
}

/// Variable jump height: an early release while rising, inside the armed
/// window, immediately scales the vertical velocity down.
pub(crate) fn apply_variable_jump(
    time: Res<Time>,
    tuning: Res<JumpTuning>,
    intent: Res<ControlIntent>,
    mut query: Query<
        (
            &GroundContact,
            &LinearVelocity,
            &mut JumpState,
            &mut GravityState,
            &mut VelocityPipeline,
        ),
        With<CharacterBody>,
    >,
) {
    if intent.jump_held {
        return;
    }
    let now = time.elapsed_secs_f64();

    for (contact, velocity, mut state, mut gravity, mut pipeline) in &mut query {
        if state.phase != JumpPhase::Rising || contact.grounded || velocity.y <= 0.0 {
            continue;
        }
        if state.variable_consumed
            || !state
                .variable_armed
                .is_within(now, tuning.variable_jump_window)
        {
            continue;
        }

        pipeline.request(VelocityRequest::set_y(
            velocity.y * tuning.variable_jump_factor,
            "jump-cut",
            Priority::JUMP,
        ));
        gravity.set_regime(GravityRegime::JumpCut);
        state.variable_consumed = true;
        debug!("jump cut: vy {} -> {}", velocity.y, velocity.y * tuning.variable_jump_factor);
    }
}

/// Track the airborne phase: Rising -> Apex -> Falling, with the apex
/// bounded by `apex_duration`. Wall-slide entry/exit is owned by the wall
/// handler and skipped here.
pub(crate) fn update_jump_phase(
    time: Res<Time>,
    gravity_tuning: Res<GravityTuning>,
    mut query: Query<
        (
            &GroundContact,
            &LinearVelocity,
            &mut JumpState,
            &mut GravityState,
        ),
        With<CharacterBody>,
    >,
) {
    let now = time.elapsed_secs_f64();

    for (contact, velocity, mut state, mut gravity) in &mut query {
        if contact.grounded {
            state.phase = JumpPhase::Grounded;
            continue;
        }

        match state.phase {
            JumpPhase::Grounded => {
                // Walked off a ledge without jumping.
                state.phase = JumpPhase::Falling;
                gravity.set_regime(GravityRegime::Falling);
            }
            JumpPhase::Rising => {
                if velocity.y.abs() < gravity_tuning.apex_threshold {
                    state.phase = JumpPhase::Apex;
                    state.apex_entered.mark(now);
                    gravity.set_regime(GravityRegime::Apex);
                } else if velocity.y < 0.0 {
                    state.phase = JumpPhase::Falling;
                    gravity.set_regime(GravityRegime::Falling);
                }
            }
            JumpPhase::Apex => {
                let expired = !state
                    .apex_entered
                    .is_within(now, gravity_tuning.apex_duration);
                if expired || velocity.y < -gravity_tuning.apex_threshold {
                    state.phase = JumpPhase::Falling;
                    gravity.set_regime(GravityRegime::Falling);
                }
            }
            JumpPhase::Falling | JumpPhase::WallSliding => {}
        }
    }
}
