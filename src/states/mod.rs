//! States domain: the per-character movement state machine.

mod components;
mod events;
mod systems;

pub use components::{CharacterFsm, CharacterState, FsmSnapshot};
pub use events::{StateChangedEvent, StateEnteredEvent, StateExitedEvent};

use bevy::prelude::*;

use crate::ControlLogicSet;

pub struct StatesPlugin;

impl Plugin for StatesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<StateChangedEvent>()
            .add_message::<StateEnteredEvent>()
            .add_message::<StateExitedEvent>()
            .add_systems(
                Update,
                systems::drive_character_fsm.in_set(ControlLogicSet::Fsm),
            );
    }
}
