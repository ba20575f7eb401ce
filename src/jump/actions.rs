//! Jump domain: the ordered, first-match jump action list.
//!
//! Each action independently answers "can I execute" and encodes its own
//! velocity side effect through the pipeline. The executor evaluates the
//! list in order and fires the first action whose precondition holds —
//! first-match, not best-match: list order encodes intentional precedence
//! (wall jump before air jump).

use bevy::prelude::*;

use crate::actor::Facing;
use crate::config::{JumpTuning, WallTuning};
use crate::detect::WallSide;
use crate::jump::JumpState;
use crate::motion::WallJumpLock;
use crate::velocity::{Priority, RequestKind, VelocityPipeline, VelocityRequest};

/// Which jump action fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    Wall,
    Air,
}

/// Contract violation: an action's `execute` failed after its own
/// `can_execute` returned true. Logged and swallowed at the call site so
/// one failing action cannot halt the physics step.
#[derive(Debug)]
pub struct ActionError {
    pub kind: JumpKind,
    pub message: String,
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} jump failed: {}", self.kind, self.message)
    }
}

/// Everything a jump action may read or touch, assembled by the executor
/// for one trigger.
pub struct JumpContext<'a> {
    pub now: f64,
    pub grounded: bool,
    pub wall_side: WallSide,
    pub velocity: Vec2,
    pub facing: Facing,
    pub tuning: &'a JumpTuning,
    pub wall_tuning: &'a WallTuning,
    pub state: &'a mut JumpState,
    pub pipeline: &'a mut VelocityPipeline,
    pub wall_lock: &'a mut WallJumpLock,
    /// Velocity the fired action launched with, recorded for the event.
    pub launch_velocity: Vec2,
}

pub trait JumpAction: Send + Sync {
    fn kind(&self) -> JumpKind;
    fn can_execute(&self, ctx: &JumpContext) -> bool;
    fn execute(&self, ctx: &mut JumpContext) -> Result<(), ActionError>;
}

/// Jump from the ground, or shortly after leaving it (coyote time).
pub struct GroundJump;

impl JumpAction for GroundJump {
    fn kind(&self) -> JumpKind {
        JumpKind::Ground
    }

    fn can_execute(&self, ctx: &JumpContext) -> bool {
        ctx.grounded || ctx.state.coyote.is_within(ctx.now, ctx.tuning.coyote_time)
    }

    fn execute(&self, ctx: &mut JumpContext) -> Result<(), ActionError> {
        let vy = ctx.tuning.jump_power;
        ctx.pipeline.jump(vy);
        // Consume coyote time so leaving the ledge cannot grant a second
        // ground jump.
        ctx.state.coyote.clear();
        ctx.state.variable_armed.mark(ctx.now);
        ctx.state.variable_consumed = false;
        ctx.launch_velocity = Vec2::new(ctx.velocity.x, vy);
        Ok(())
    }
}

/// Jump off a touched (or just-lost) wall, away from it.
pub struct WallJump;

impl JumpAction for WallJump {
    fn kind(&self) -> JumpKind {
        JumpKind::Wall
    }

    fn can_execute(&self, ctx: &JumpContext) -> bool {
        let wall_available = ctx.wall_side != WallSide::None
            || ctx
                .state
                .wall_coyote
                .is_within(ctx.now, ctx.wall_tuning.wall_coyote_time);
        !ctx.grounded && wall_available && ctx.velocity.y < 0.0
    }

    fn execute(&self, ctx: &mut JumpContext) -> Result<(), ActionError> {
        let side = if ctx.wall_side != WallSide::None {
            ctx.wall_side
        } else {
            ctx.state.last_wall_side
        };
        let away = match side {
            WallSide::None => -ctx.facing.sign(),
            side => side.away_sign(),
        };
        if away == 0.0 {
            return Err(ActionError {
                kind: JumpKind::Wall,
                message: "no wall side to launch away from".to_string(),
            });
        }

        let launch = Vec2::new(
            away * ctx.wall_tuning.wall_jump_horizontal,
            ctx.wall_tuning.wall_jump_vertical,
        );
        ctx.pipeline.request(VelocityRequest::new(
            RequestKind::Set,
            launch,
            "wall-jump",
            Priority::JUMP,
        ));
        ctx.wall_lock.0 = ctx.wall_tuning.wall_jump_lock_time;
        // A wall jump refreshes the air jump pool so wall-kick chains work.
        ctx.state.air_jumps_remaining = ctx.tuning.max_air_jumps;
        ctx.state.wall_coyote.clear();
        // Only ground jumps are height-variable; a stale arm window from a
        // preceding ground jump must not cut this launch.
        ctx.state.variable_armed.clear();
        ctx.launch_velocity = launch;
        Ok(())
    }
}

/// Mid-air jump, limited by the remaining air-jump pool.
pub struct AirJump;

impl JumpAction for AirJump {
    fn kind(&self) -> JumpKind {
        JumpKind::Air
    }

    fn can_execute(&self, ctx: &JumpContext) -> bool {
        !ctx.grounded && ctx.state.air_jumps_remaining > 0
    }

    fn execute(&self, ctx: &mut JumpContext) -> Result<(), ActionError> {
        let vy = ctx.tuning.jump_power * ctx.tuning.double_jump_multiplier;
        ctx.pipeline.jump(vy);
        ctx.state.air_jumps_remaining -= 1;
        // Only ground jumps are height-variable; a stale arm window from a
        // preceding ground jump must not cut this launch.
        ctx.state.variable_armed.clear();
        ctx.launch_velocity = Vec2::new(ctx.velocity.x, vy);
        Ok(())
    }
}

/// The executor's ordered action list. Default order: ground, wall, air.
#[derive(Component)]
pub struct JumpActions(pub Vec<Box<dyn JumpAction>>);

impl Default for JumpActions {
    fn default() -> Self {
        Self(vec![
            Box::new(GroundJump),
            Box::new(WallJump),
            Box::new(AirJump),
        ])
    }
}
