//! States domain: movement state change events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use super::CharacterState;

/// One recorded movement-state transition. `from` is `None` only for the
/// machine's initial entry.
#[derive(Debug)]
pub struct StateChangedEvent {
    pub entity: Entity,
    pub from: Option<CharacterState>,
    pub to: CharacterState,
}

impl Message for StateChangedEvent {}

/// Fired for the entered side of every transition, for listeners that only
/// care about one state.
#[derive(Debug)]
pub struct StateEnteredEvent {
    pub entity: Entity,
    pub state: CharacterState,
}

impl Message for StateEnteredEvent {}

/// Fired for the exited side of every transition.
#[derive(Debug)]
pub struct StateExitedEvent {
    pub entity: Entity,
    pub state: CharacterState,
}

impl Message for StateExitedEvent {}
