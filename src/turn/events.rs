//! Turn domain: phase change events.

use bevy::ecs::message::Message;

use super::TurnPhase;

/// One battle phase transition, with the round it happened in.
#[derive(Debug)]
pub struct TurnChangedEvent {
    pub from: Option<TurnPhase>,
    pub to: TurnPhase,
    pub round: u32,
}

impl Message for TurnChangedEvent {}
