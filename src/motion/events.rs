//! Motion domain: dash and wall-slide lifecycle events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::detect::WallSide;

#[derive(Debug)]
pub struct DashStartedEvent {
    pub entity: Entity,
    pub direction: Vec2,
}

impl Message for DashStartedEvent {}

#[derive(Debug)]
pub struct DashEndedEvent {
    pub entity: Entity,
}

impl Message for DashEndedEvent {}

#[derive(Debug)]
pub struct WallSlideStartedEvent {
    pub entity: Entity,
    pub side: WallSide,
}

impl Message for WallSlideStartedEvent {}

#[derive(Debug)]
pub struct WallSlideEndedEvent {
    pub entity: Entity,
}

impl Message for WallSlideEndedEvent {}
