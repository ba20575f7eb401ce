//! Motion domain: run acceleration, dash lifecycle, wall sliding, facing.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::actor::{CharacterBody, Facing};
use crate::config::{DashTuning, LocomotionTuning, WallTuning};
use crate::detect::{GroundContact, GroundEnteredEvent, WallContactState, WallSide};
use crate::gravity::{GravityRegime, GravityState, GravityTuning};
use crate::input::ControlIntent;
use crate::jump::{JumpPhase, JumpState};
use crate::motion::{
    approach, snap_to_compass, DashEndedEvent, DashHandler, DashStartedEvent, MovementHandler,
    SpeedBucket, WallHandler, WallJumpLock, WallSlideEndedEvent, WallSlideStartedEvent,
};
use crate::velocity::{Priority, VelocityPipeline, VelocityRequest};

/// Tick down the post-wall-jump input lock.
pub(crate) fn tick_wall_jump_lock(
    time: Res<Time>,
    mut query: Query<&mut WallJumpLock, With<CharacterBody>>,
) {
    let dt = time.delta_secs();
    for mut lock in &mut query {
        if lock.0 > 0.0 {
            lock.0 = (lock.0 - dt).max(0.0);
        }
    }
}

/// Translate horizontal intent into a Set request on the x axis.
///
/// The request is rebuilt every physics tick, so speed approaches the
/// target at a rate picked by how the current velocity relates to it:
/// accelerating, decelerating, or turning around, with the air
/// multiplier applied while airborne.
pub(crate) fn issue_movement_requests(
    time: Res<Time>,
    tuning: Res<LocomotionTuning>,
    intent: Res<ControlIntent>,
    mut query: Query<
        (
            &MovementHandler,
            &DashHandler,
            &WallJumpLock,
            &GroundContact,
            &LinearVelocity,
            &mut VelocityPipeline,
        ),
        With<CharacterBody>,
    >,
) {
    let dt = time.delta_secs();

    for (movement, dash, lock, contact, velocity, mut pipeline) in &mut query {
        if !movement.enabled || dash.dashing || lock.is_locked() {
            continue;
        }

        let target = intent.axis.x * tuning.run_speed;
        let bucket = SpeedBucket::classify(velocity.x, target);
        let rate = match bucket {
            SpeedBucket::AtTarget => continue,
            SpeedBucket::Accelerating => tuning.acceleration,
            SpeedBucket::Decelerating => tuning.deceleration,
            SpeedBucket::TurnAround => tuning.turn_rate,
        };
        let rate = if contact.grounded {
            rate
        } else {
            rate * tuning.air_multiplier
        };

        pipeline.move_horizontal(approach(velocity.x, target, rate, dt));
    }
}

/// Flip the sprite-facing component toward horizontal intent. Frozen
/// while dashing or wall-jump-locked so the launch direction reads true.
pub(crate) fn update_facing(
    intent: Res<ControlIntent>,
    mut query: Query<(&mut Facing, &DashHandler, &WallJumpLock), With<CharacterBody>>,
) {
    for (mut facing, dash, lock) in &mut query {
        if dash.dashing || lock.is_locked() {
            continue;
        }
        if intent.axis.x > 0.0 {
            *facing = Facing::Right;
        } else if intent.axis.x < 0.0 {
            *facing = Facing::Left;
        }
    }
}

/// Start a dash on a latched dash press.
///
/// The direction is the current stick direction snapped to eight-way,
/// falling back to facing on neutral stick. Starting consumes one dash
/// from the pool and stamps the dash timer.
pub(crate) fn start_dash(
    time: Res<Time>,
    tuning: Res<DashTuning>,
    mut intent: ResMut<ControlIntent>,
    mut started: MessageWriter<DashStartedEvent>,
    mut query: Query<
        (
            Entity,
            &Facing,
            &GroundContact,
            &mut DashHandler,
            &mut VelocityPipeline,
        ),
        With<CharacterBody>,
    >,
) {
    if !intent.take_dash_pressed() {
        return;
    }
    let now = time.elapsed_secs_f64();

    for (entity, facing, contact, mut dash, mut pipeline) in &mut query {
        if !dash.enabled || dash.dashing || dash.dashes_remaining == 0 {
            continue;
        }
        if dash.cooldown.is_within(now, tuning.dash_cooldown) {
            debug!("dash refused: cooling down");
            continue;
        }
        if tuning.ground_only && !contact.grounded {
            continue;
        }

        let mut direction = snap_to_compass(intent.raw_axis);
        if direction == Vec2::ZERO {
            direction = facing.vector();
        }

        dash.dashing = true;
        dash.direction = direction;
        dash.started.mark(now);
        dash.dashes_remaining -= 1;
        pipeline.dash(direction * tuning.dash_speed);
        debug!("dash started toward {direction:?}");
        started.write(DashStartedEvent { entity, direction });
    }
}

/// Hold the dash velocity for the dash's duration. The Override request
/// is one-shot, so it is reissued every physics tick the dash lasts.
pub(crate) fn sustain_dash(
    tuning: Res<DashTuning>,
    mut query: Query<(&DashHandler, &mut VelocityPipeline), With<CharacterBody>>,
) {
    for (dash, mut pipeline) in &mut query {
        if dash.dashing {
            pipeline.dash(dash.direction * tuning.dash_speed);
        }
    }
}

/// End dashes whose duration has elapsed and stamp the cooldown.
pub(crate) fn end_expired_dashes(
    time: Res<Time>,
    tuning: Res<DashTuning>,
    mut ended: MessageWriter<DashEndedEvent>,
    mut query: Query<(Entity, &mut DashHandler), With<CharacterBody>>,
) {
    let now = time.elapsed_secs_f64();

    for (entity, mut dash) in &mut query {
        if dash.dashing && !dash.started.is_within(now, tuning.dash_duration) {
            dash.dashing = false;
            dash.direction = Vec2::ZERO;
            dash.cooldown.mark(now);
            debug!("dash ended");
            ended.write(DashEndedEvent { entity });
        }
    }
}

/// Refill the dash pool on landing.
pub(crate) fn rearm_dashes_on_landing(
    tuning: Res<DashTuning>,
    mut landings: MessageReader<GroundEnteredEvent>,
    mut query: Query<&mut DashHandler, With<CharacterBody>>,
) {
    for event in landings.read() {
        if let Ok(mut dash) = query.get_mut(event.entity) {
            dash.dashes_remaining = tuning.max_dashes;
        }
    }
}

/// Enter and leave the wall slide.
///
/// Sliding requires being airborne, falling, touching a wall, and holding
/// input into it; losing any of those ends the slide. Entry and exit drive
/// the jump phase and the gravity regime so the rest of the controller
/// follows along.
pub(crate) fn update_wall_slide(
    intent: Res<ControlIntent>,
    mut slide_started: MessageWriter<WallSlideStartedEvent>,
    mut slide_ended: MessageWriter<WallSlideEndedEvent>,
    mut query: Query<
        (
            Entity,
            &GroundContact,
            &WallContactState,
            &LinearVelocity,
            &DashHandler,
            &mut WallHandler,
            &mut JumpState,
            &mut GravityState,
        ),
        With<CharacterBody>,
    >,
) {
    for (entity, contact, wall, velocity, dash, mut handler, mut jump, mut gravity) in &mut query {
        let pressing_toward = intent.axis.x * wall.side.toward_sign() > 0.0;
        let should_slide = handler.enabled
            && !dash.dashing
            && !contact.grounded
            && wall.side != WallSide::None
            && pressing_toward
            && velocity.y < 0.0;

        if should_slide && !handler.sliding {
            handler.sliding = true;
            jump.phase = JumpPhase::WallSliding;
            gravity.set_regime(GravityRegime::WallSliding);
            debug!("wall slide started on {:?}", wall.side);
            slide_started.write(WallSlideStartedEvent {
                entity,
                side: wall.side,
            });
        } else if !should_slide && handler.sliding {
            handler.sliding = false;
            if !contact.grounded {
                jump.phase = JumpPhase::Falling;
                gravity.set_regime(GravityRegime::Falling);
            }
            debug!("wall slide ended");
            slide_ended.write(WallSlideEndedEvent { entity });
        }
    }
}

/// Clamp downward speed while sliding. A Set request at movement
/// priority, so jumps and dashes still punch through.
///
/// The check is predictive: the clamp fires on any step where this tick's
/// slide gravity would carry the body past the cap, so the resolved fall
/// speed lands on exactly `wall_slide_speed` and never under it.
pub(crate) fn clamp_wall_slide(
    time: Res<Time>,
    tuning: Res<WallTuning>,
    gravity_tuning: Res<GravityTuning>,
    mut query: Query<(&WallHandler, &LinearVelocity, &mut VelocityPipeline), With<CharacterBody>>,
) {
    let dt = time.delta_secs();

    for (handler, velocity, mut pipeline) in &mut query {
        if !handler.sliding {
            continue;
        }
        let predicted = velocity.y - gravity_tuning.wall_sliding * dt;
        if predicted <= -tuning.wall_slide_speed {
            pipeline.request(VelocityRequest::set_y(
                -tuning.wall_slide_speed,
                "wall-slide",
                Priority::MOVEMENT,
            ));
        }
    }
}
