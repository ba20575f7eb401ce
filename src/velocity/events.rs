//! Velocity domain: resolution events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Emitted after a resolve step whose output differs from the previous
/// velocity by more than the change epsilon.
#[derive(Debug)]
pub struct VelocityChangedEvent {
    pub entity: Entity,
    pub previous: Vec2,
    pub current: Vec2,
}

impl Message for VelocityChangedEvent {}
