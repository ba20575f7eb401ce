//! Detect domain: contact state and surface classification.

use bevy::prelude::*;

/// Which side of the character a wall is touching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallSide {
    #[default]
    None,
    Left,
    Right,
}

impl WallSide {
    /// Input-axis sign that points *into* the wall.
    pub fn toward_sign(self) -> f32 {
        match self {
            WallSide::None => 0.0,
            WallSide::Left => -1.0,
            WallSide::Right => 1.0,
        }
    }

    /// Input-axis sign that points *away from* the wall.
    pub fn away_sign(self) -> f32 {
        -self.toward_sign()
    }
}

/// Classification of a detected collision surface by its contact normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceType {
    #[default]
    None,
    Ground,
    Wall,
    Ceiling,
}

/// Result of a directional surface query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceProbe {
    pub has_collision: bool,
    pub surface: SurfaceType,
    pub normal: Vec2,
}

impl SurfaceProbe {
    pub fn miss() -> Self {
        Self {
            has_collision: false,
            surface: SurfaceType::None,
            normal: Vec2::ZERO,
        }
    }
}

/// Observable grounded flag, written by the probes (or by a host-supplied
/// detector) and read by everything else.
#[derive(Component, Debug, Default)]
pub struct GroundContact {
    pub grounded: bool,
}

/// Observable wall contact, written by the probes (or a host detector).
#[derive(Component, Debug, Default)]
pub struct WallContactState {
    pub side: WallSide,
}

impl WallContactState {
    pub fn is_detecting_wall(&self) -> bool {
        self.side != WallSide::None
    }
}

/// Classify a contact normal by its dominant axis. `slope_threshold` is
/// the normalized-Y cutoff separating walkable ground from wall.
pub fn classify_normal(normal: Vec2, slope_threshold: f32) -> SurfaceType {
    if normal == Vec2::ZERO {
        return SurfaceType::None;
    }
    let normal = normal.normalize();
    if normal.y >= slope_threshold {
        SurfaceType::Ground
    } else if normal.y <= -slope_threshold {
        SurfaceType::Ceiling
    } else {
        SurfaceType::Wall
    }
}
