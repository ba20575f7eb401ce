//! Config domain: tuning resources and their defaults.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Horizontal locomotion feel.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct LocomotionTuning {
    /// Target speed at full input deflection.
    pub run_speed: f32,
    /// Speed-up rate toward a faster target in the same direction.
    pub acceleration: f32,
    /// Slow-down rate toward a slower or zero target.
    pub deceleration: f32,
    /// Rate while reversing direction; snappier than plain acceleration.
    pub turn_rate: f32,
    /// Scale on all rates while airborne.
    pub air_multiplier: f32,
}

impl Default for LocomotionTuning {
    fn default() -> Self {
        Self {
            run_speed: 320.0,
            acceleration: 3000.0,
            deceleration: 2600.0,
            turn_rate: 4200.0,
            air_multiplier: 0.65,
        }
    }
}

/// Jump subsystem windows and strengths. All windows are seconds.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct JumpTuning {
    pub jump_power: f32,
    /// Grace period after leaving a ledge during which a ground jump is
    /// still accepted.
    pub coyote_time: f32,
    /// How long an unhonored jump press stays buffered.
    pub buffer_time: f32,
    /// Minimum interval between executed jumps, so one input edge cannot
    /// double-trigger across adjacent logic ticks.
    pub min_jump_interval: f32,
    /// Vertical velocity scale applied when the jump input is released
    /// while still rising.
    pub variable_jump_factor: f32,
    /// How long after launch an early release still cuts the jump.
    pub variable_jump_window: f32,
    /// Scale on `jump_power` for air jumps.
    pub double_jump_multiplier: f32,
    /// 0 = no double jump, 1 = double jump, 2 = triple, etc.
    pub max_air_jumps: u8,
}

impl Default for JumpTuning {
    fn default() -> Self {
        Self {
            jump_power: 680.0,
            coyote_time: 0.12,
            buffer_time: 0.12,
            min_jump_interval: 0.1,
            variable_jump_factor: 0.5,
            variable_jump_window: 0.25,
            double_jump_multiplier: 0.9,
            max_air_jumps: 1,
        }
    }
}

impl JumpTuning {
    /// Maximum height of a full-power ground jump: `v^2 / 2g`.
    pub fn single_jump_height(&self, gravity: f32) -> f32 {
        self.jump_power * self.jump_power / (2.0 * gravity)
    }
}

/// Dash feel.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct DashTuning {
    pub dash_speed: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,
    /// Dashes available before the character must land to re-arm.
    pub max_dashes: u8,
    /// Restrict dashing to grounded starts.
    pub ground_only: bool,
}

impl Default for DashTuning {
    fn default() -> Self {
        Self {
            dash_speed: 900.0,
            dash_duration: 0.16,
            dash_cooldown: 0.35,
            max_dashes: 1,
            ground_only: false,
        }
    }
}

/// Wall interaction feel.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct WallTuning {
    /// Fall speed ceiling while sliding on a wall.
    pub wall_slide_speed: f32,
    /// Horizontal launch speed of a wall jump, away from the wall.
    pub wall_jump_horizontal: f32,
    /// Vertical launch speed of a wall jump.
    pub wall_jump_vertical: f32,
    /// How long horizontal input is ignored after a wall jump.
    pub wall_jump_lock_time: f32,
    /// Grace period after leaving a wall during which a wall jump is still
    /// accepted.
    pub wall_coyote_time: f32,
}

impl Default for WallTuning {
    fn default() -> Self {
        Self {
            wall_slide_speed: 100.0,
            wall_jump_horizontal: 400.0,
            wall_jump_vertical: 600.0,
            wall_jump_lock_time: 0.15,
            wall_coyote_time: 0.08,
        }
    }
}

/// Ray probe shape for the default detectors.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct DetectionTuning {
    /// Rays fanned across the character's feet.
    pub ground_ray_count: u8,
    pub ground_ray_length: f32,
    /// Rays fanned along each side of the character.
    pub wall_ray_count: u8,
    pub wall_ray_length: f32,
    /// Dominant-axis threshold on a contact normal separating walkable
    /// ground from walls, in normalized units.
    pub slope_threshold: f32,
}

impl Default for DetectionTuning {
    fn default() -> Self {
        Self {
            ground_ray_count: 3,
            ground_ray_length: 4.0,
            wall_ray_count: 2,
            wall_ray_length: 4.0,
            slope_threshold: 0.7,
        }
    }
}

/// Hard velocity constraints applied after every resolve.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct VelocityLimits {
    pub max_horizontal_speed: f32,
    /// Upward speed ceiling.
    pub max_vertical_speed: f32,
    /// Downward speed ceiling.
    pub terminal_velocity: f32,
}

impl Default for VelocityLimits {
    fn default() -> Self {
        Self {
            max_horizontal_speed: 1000.0,
            max_vertical_speed: 1000.0,
            terminal_velocity: 1400.0,
        }
    }
}
