//! Jump domain: unit tests for timers and the action list.

use bevy::prelude::*;

use super::{
    AirJump, GroundJump, JumpAction, JumpActions, JumpContext, JumpKind, JumpState, StampTimer,
    WallJump,
};
use crate::actor::Facing;
use crate::config::{JumpTuning, VelocityLimits, WallTuning};
use crate::detect::WallSide;
use crate::motion::WallJumpLock;
use crate::velocity::VelocityPipeline;

const EPSILON: f64 = 1e-4;

#[test]
fn test_stamp_timer_window_boundary() {
    let mut timer = StampTimer::default();
    let window = 0.12f32;
    timer.mark(10.0);

    assert!(timer.is_within(10.0 + f64::from(window) - EPSILON, window));
    assert!(!timer.is_within(10.0 + f64::from(window) + EPSILON, window));
}

#[test]
fn test_stamp_timer_unmarked_is_never_active() {
    let timer = StampTimer::default();
    assert!(!timer.is_within(0.0, 10.0));
    assert_eq!(timer.elapsed(5.0), None);
}

#[test]
fn test_stamp_timer_clear_consumes_the_window() {
    let mut timer = StampTimer::default();
    timer.mark(1.0);
    assert!(timer.is_within(1.05, 0.1));
    timer.clear();
    assert!(!timer.is_within(1.05, 0.1));
}

struct Fixture {
    state: JumpState,
    pipeline: VelocityPipeline,
    wall_lock: WallJumpLock,
    tuning: JumpTuning,
    wall_tuning: WallTuning,
}

impl Fixture {
    fn new() -> Self {
        Self {
            state: JumpState::new(1),
            pipeline: VelocityPipeline::default(),
            wall_lock: WallJumpLock::default(),
            tuning: JumpTuning::default(),
            wall_tuning: WallTuning::default(),
        }
    }

    fn ctx(
        &mut self,
        now: f64,
        grounded: bool,
        wall_side: WallSide,
        velocity: Vec2,
    ) -> JumpContext<'_> {
        JumpContext {
            now,
            grounded,
            wall_side,
            velocity,
            facing: Facing::Right,
            tuning: &self.tuning,
            wall_tuning: &self.wall_tuning,
            state: &mut self.state,
            pipeline: &mut self.pipeline,
            wall_lock: &mut self.wall_lock,
            launch_velocity: Vec2::ZERO,
        }
    }
}

/// Resolve the fixture's pipeline with arbitration only.
fn resolved(pipeline: &mut VelocityPipeline, current: Vec2) -> Vec2 {
    pipeline
        .resolve(current, 0.0, true, 1.0 / 60.0, &VelocityLimits::default())
        .0
}

#[test]
fn test_ground_jump_allowed_while_grounded() {
    let mut fixture = Fixture::new();
    let ctx = fixture.ctx(0.0, true, WallSide::None, Vec2::ZERO);
    assert!(GroundJump.can_execute(&ctx));
}

#[test]
fn test_ground_jump_allowed_inside_coyote_window_only() {
    let mut fixture = Fixture::new();
    fixture.state.coyote.mark(5.0);
    let window = f64::from(fixture.tuning.coyote_time);

    let ctx = fixture.ctx(5.0 + window - EPSILON, false, WallSide::None, Vec2::ZERO);
    assert!(GroundJump.can_execute(&ctx));

    let ctx = fixture.ctx(5.0 + window + EPSILON, false, WallSide::None, Vec2::ZERO);
    assert!(!GroundJump.can_execute(&ctx));
}

#[test]
fn test_ground_jump_sets_vertical_velocity_and_consumes_coyote() {
    let mut fixture = Fixture::new();
    fixture.state.coyote.mark(0.0);
    let power = fixture.tuning.jump_power;

    let mut ctx = fixture.ctx(0.01, true, WallSide::None, Vec2::new(50.0, 0.0));
    GroundJump.execute(&mut ctx).unwrap();
    assert_eq!(ctx.launch_velocity, Vec2::new(50.0, power));

    let out = resolved(&mut fixture.pipeline, Vec2::new(50.0, 0.0));
    assert_eq!(out.y, power);
    // Coyote consumed: no second ground jump from the same ledge exit.
    assert!(!fixture.state.coyote.is_within(0.02, 1.0));
}

#[test]
fn test_wall_jump_requires_airborne_falling_wall() {
    let mut fixture = Fixture::new();

    let ctx = fixture.ctx(0.0, false, WallSide::Right, Vec2::new(0.0, -120.0));
    assert!(WallJump.can_execute(&ctx));

    // Rising: no wall jump.
    let ctx = fixture.ctx(0.0, false, WallSide::Right, Vec2::new(0.0, 120.0));
    assert!(!WallJump.can_execute(&ctx));

    // Grounded: no wall jump.
    let ctx = fixture.ctx(0.0, true, WallSide::Right, Vec2::new(0.0, -120.0));
    assert!(!WallJump.can_execute(&ctx));

    // No wall and no wall coyote: no wall jump.
    let ctx = fixture.ctx(0.0, false, WallSide::None, Vec2::new(0.0, -120.0));
    assert!(!WallJump.can_execute(&ctx));
}

#[test]
fn test_wall_jump_launches_away_and_locks_input() {
    let mut fixture = Fixture::new();
    fixture.state.air_jumps_remaining = 0;
    let horizontal = fixture.wall_tuning.wall_jump_horizontal;
    let vertical = fixture.wall_tuning.wall_jump_vertical;
    let lock = fixture.wall_tuning.wall_jump_lock_time;

    let mut ctx = fixture.ctx(0.0, false, WallSide::Right, Vec2::new(0.0, -200.0));
    WallJump.execute(&mut ctx).unwrap();
    assert_eq!(ctx.launch_velocity, Vec2::new(-horizontal, vertical));

    assert_eq!(fixture.wall_lock.0, lock);
    // Wall jump refreshes the air-jump pool.
    assert_eq!(
        fixture.state.air_jumps_remaining,
        fixture.tuning.max_air_jumps
    );
}

#[test]
fn test_air_jump_decrements_pool() {
    let mut fixture = Fixture::new();
    assert_eq!(fixture.state.air_jumps_remaining, 1);

    let ctx = fixture.ctx(0.0, false, WallSide::None, Vec2::new(0.0, -50.0));
    assert!(AirJump.can_execute(&ctx));

    let power = fixture.tuning.jump_power * fixture.tuning.double_jump_multiplier;
    let mut ctx = fixture.ctx(0.0, false, WallSide::None, Vec2::new(0.0, -50.0));
    AirJump.execute(&mut ctx).unwrap();
    assert_eq!(ctx.launch_velocity.y, power);
    assert_eq!(fixture.state.air_jumps_remaining, 0);

    let ctx = fixture.ctx(0.0, false, WallSide::None, Vec2::new(0.0, -50.0));
    assert!(!AirJump.can_execute(&ctx));
}

/// Airborne, falling, coyote expired: the ground action is rejected and
/// the air action fires instead at the double-jump multiplier.
#[test]
fn test_first_match_falls_through_to_air_jump() {
    let mut fixture = Fixture::new();
    fixture.state.coyote.mark(0.0);
    let now = 5.0; // long past the coyote window
    let actions = JumpActions::default();

    let mut fired = None;
    let mut ctx = fixture.ctx(now, false, WallSide::None, Vec2::new(0.0, -80.0));
    for action in &actions.0 {
        if action.can_execute(&ctx) {
            action.execute(&mut ctx).unwrap();
            fired = Some(action.kind());
            break;
        }
    }

    assert_eq!(fired, Some(JumpKind::Air));
    let expected = fixture.tuning.jump_power * fixture.tuning.double_jump_multiplier;
    let out = resolved(&mut fixture.pipeline, Vec2::new(0.0, -80.0));
    assert_eq!(out.y, expected);
}

/// Wall jump outranks air jump when both are possible: list order encodes
/// precedence.
#[test]
fn test_wall_jump_takes_precedence_over_air_jump() {
    let mut fixture = Fixture::new();
    let actions = JumpActions::default();

    let mut fired = None;
    let mut ctx = fixture.ctx(0.0, false, WallSide::Left, Vec2::new(0.0, -80.0));
    for action in &actions.0 {
        if action.can_execute(&ctx) {
            action.execute(&mut ctx).unwrap();
            fired = Some(action.kind());
            break;
        }
    }

    assert_eq!(fired, Some(JumpKind::Wall));
    // Air jump pool untouched (then refreshed by the wall jump).
    assert_eq!(
        fixture.state.air_jumps_remaining,
        fixture.tuning.max_air_jumps
    );
}

/// An air jump taken inside a ground jump's still-open arm window must
/// disarm it: only ground jumps are height-variable.
#[test]
fn test_air_jump_disarms_variable_jump() {
    let mut fixture = Fixture::new();
    let window = fixture.tuning.variable_jump_window;

    // Ground jump arms the window, then an air jump follows quickly.
    let mut ctx = fixture.ctx(0.0, true, WallSide::None, Vec2::ZERO);
    GroundJump.execute(&mut ctx).unwrap();
    let mut ctx = fixture.ctx(0.05, false, WallSide::None, Vec2::new(0.0, 20.0));
    AirJump.execute(&mut ctx).unwrap();

    assert!(!fixture.state.variable_armed.is_within(0.06, window));
}

#[test]
fn test_wall_jump_disarms_variable_jump() {
    let mut fixture = Fixture::new();
    let window = fixture.tuning.variable_jump_window;

    let mut ctx = fixture.ctx(0.0, true, WallSide::None, Vec2::ZERO);
    GroundJump.execute(&mut ctx).unwrap();
    let mut ctx = fixture.ctx(0.05, false, WallSide::Left, Vec2::new(0.0, -30.0));
    WallJump.execute(&mut ctx).unwrap();

    assert!(!fixture.state.variable_armed.is_within(0.06, window));
}

#[test]
fn test_cooldown_window_blocks_double_trigger() {
    let tuning = JumpTuning::default();
    let mut state = JumpState::new(0);
    state.cooldown.mark(1.0);

    // Within the interval the executor must skip; after it, it may fire.
    assert!(state
        .cooldown
        .is_within(1.0 + f64::from(tuning.min_jump_interval) / 2.0, tuning.min_jump_interval));
    assert!(!state
        .cooldown
        .is_within(1.0 + f64::from(tuning.min_jump_interval) + EPSILON, tuning.min_jump_interval));
}
