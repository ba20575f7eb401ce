//! Motion domain: handler components for run, dash, and wall interaction.

use bevy::prelude::*;

use crate::jump::StampTimer;

/// Horizontal run control. Disable to hand the x axis to cutscenes or
/// knockback without despawning anything.
#[derive(Component, Debug)]
pub struct MovementHandler {
    pub enabled: bool,
}

impl Default for MovementHandler {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Dash control and its per-character budget.
#[derive(Component, Debug)]
pub struct DashHandler {
    pub enabled: bool,
    pub dashing: bool,
    /// Direction of the dash in flight, snapped to a compass direction.
    pub direction: Vec2,
    /// Stamped when the current dash started.
    pub started: StampTimer,
    /// Stamped when the last dash ended.
    pub cooldown: StampTimer,
    pub dashes_remaining: u8,
}

impl DashHandler {
    pub fn new(max_dashes: u8) -> Self {
        Self {
            enabled: true,
            dashing: false,
            direction: Vec2::ZERO,
            started: StampTimer::default(),
            cooldown: StampTimer::default(),
            dashes_remaining: max_dashes,
        }
    }
}

impl Default for DashHandler {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Wall slide control.
#[derive(Component, Debug)]
pub struct WallHandler {
    pub enabled: bool,
    pub sliding: bool,
}

impl Default for WallHandler {
    fn default() -> Self {
        Self {
            enabled: true,
            sliding: false,
        }
    }
}

/// Seconds during which run input is ignored after a wall jump, so the
/// held-toward-the-wall stick cannot cancel the launch.
#[derive(Component, Debug, Default)]
pub struct WallJumpLock(pub f32);

impl WallJumpLock {
    pub fn is_locked(&self) -> bool {
        self.0 > 0.0
    }
}

/// Which acceleration rate applies to the current (velocity, intent) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedBucket {
    /// Already at the target velocity.
    AtTarget,
    /// Intent and velocity agree in sign; speed still below target.
    Accelerating,
    /// No intent, or intent below the current speed; bleeding off.
    Decelerating,
    /// Intent opposes the current velocity.
    TurnAround,
}

impl SpeedBucket {
    /// Classify one axis of motion against its target.
    pub fn classify(current: f32, target: f32) -> Self {
        if (target - current).abs() < f32::EPSILON {
            return Self::AtTarget;
        }
        if target == 0.0 {
            return Self::Decelerating;
        }
        if current != 0.0 && current.signum() != target.signum() {
            return Self::TurnAround;
        }
        if current.abs() > target.abs() {
            Self::Decelerating
        } else {
            Self::Accelerating
        }
    }
}

/// Snap a direction onto the nearest of the eight compass directions.
/// Zero input stays zero; the caller substitutes facing.
pub fn snap_to_compass(direction: Vec2) -> Vec2 {
    if direction == Vec2::ZERO {
        return Vec2::ZERO;
    }
    const DIAG: f32 = std::f32::consts::FRAC_1_SQRT_2;
    const COMPASS: [Vec2; 8] = [
        Vec2::new(1.0, 0.0),
        Vec2::new(DIAG, DIAG),
        Vec2::new(0.0, 1.0),
        Vec2::new(-DIAG, DIAG),
        Vec2::new(-1.0, 0.0),
        Vec2::new(-DIAG, -DIAG),
        Vec2::new(0.0, -1.0),
        Vec2::new(DIAG, -DIAG),
    ];

    let unit = direction.normalize();
    let mut best = COMPASS[0];
    let mut best_dot = f32::MIN;
    for candidate in COMPASS {
        let dot = unit.dot(candidate);
        if dot > best_dot {
            best_dot = dot;
            best = candidate;
        }
    }
    best
}

/// Move `current` toward `target` at `rate` units per second without
/// overshooting.
pub fn approach(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let step = rate * dt;
    if (target - current).abs() <= step {
        target
    } else {
        current + step * (target - current).signum()
    }
}
