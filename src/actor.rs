//! Character identity: body marker, facing, physics layers, spawn helper.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::detect::{GroundContact, WallContactState};
use crate::gravity::GravityState;
use crate::jump::{JumpActions, JumpState};
use crate::motion::{DashHandler, MovementHandler, WallHandler, WallJumpLock};
use crate::states::CharacterFsm;
use crate::velocity::VelocityPipeline;

/// Physics layers for collision filtering.
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Simulated characters
    Character,
    /// Sensors (triggers) - should not block movement
    Sensor,
}

/// Marker for a simulated character body driven by this crate.
#[derive(Component, Debug)]
pub struct CharacterBody;

/// Horizontal facing, updated from movement input.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn vector(self) -> Vec2 {
        Vec2::new(self.sign(), 0.0)
    }
}

/// Full component stack for a controllable character body.
///
/// The caller supplies the collider; everything else gets crate defaults.
/// Gravity is handled by the velocity pipeline, so the physics engine's own
/// gravity is zeroed out.
pub fn character_body(collider: Collider, max_air_jumps: u8, max_dashes: u8) -> impl Bundle {
    (
        (
            CharacterBody,
            Facing::default(),
            VelocityPipeline::default(),
            GravityState::default(),
            JumpState::new(max_air_jumps),
            JumpActions::default(),
            MovementHandler::default(),
            DashHandler::new(max_dashes),
            WallHandler::default(),
            WallJumpLock::default(),
            GroundContact::default(),
            WallContactState::default(),
            CharacterFsm::default(),
        ),
        (
            RigidBody::Dynamic,
            collider,
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0),
            Friction::new(0.0),
            CollisionLayers::new(
                GameLayer::Character,
                [GameLayer::Ground, GameLayer::Wall, GameLayer::Sensor],
            ),
        ),
    )
}
