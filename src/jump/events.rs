//! Jump domain: jump execution events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use super::JumpKind;

/// Emitted when a jump action fires, for gravity/animation/audio layers.
#[derive(Debug)]
pub struct JumpExecutedEvent {
    pub entity: Entity,
    pub kind: JumpKind,
    /// The velocity the jump launched with.
    pub velocity: Vec2,
}

impl Message for JumpExecutedEvent {}
