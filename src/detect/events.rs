//! Detect domain: contact edge events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use super::WallSide;

/// Fired once on the tick a character's feet find ground.
#[derive(Debug)]
pub struct GroundEnteredEvent {
    pub entity: Entity,
}

impl Message for GroundEnteredEvent {}

/// Fired once on the tick a character leaves the ground.
#[derive(Debug)]
pub struct GroundExitedEvent {
    pub entity: Entity,
}

impl Message for GroundExitedEvent {}

/// Fired once when wall contact begins (or switches sides).
#[derive(Debug)]
pub struct WallEnteredEvent {
    pub entity: Entity,
    pub side: WallSide,
}

impl Message for WallEnteredEvent {}

/// Fired once when wall contact ends.
#[derive(Debug)]
pub struct WallExitedEvent {
    pub entity: Entity,
}

impl Message for WallExitedEvent {}
