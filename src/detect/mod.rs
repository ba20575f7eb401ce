//! Detect domain: ground/wall contact interfaces and default ray probes.

mod components;
mod events;
mod systems;

pub use components::{
    GroundContact, SurfaceProbe, SurfaceType, WallContactState, WallSide, classify_normal,
};
pub use events::{GroundEnteredEvent, GroundExitedEvent, WallEnteredEvent, WallExitedEvent};
pub use systems::check_direction;

use bevy::prelude::*;

use crate::ControlLogicSet;

pub struct DetectPlugin;

impl Plugin for DetectPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<GroundEnteredEvent>()
            .add_message::<GroundExitedEvent>()
            .add_message::<WallEnteredEvent>()
            .add_message::<WallExitedEvent>()
            .add_systems(
                Update,
                (systems::detect_ground, systems::detect_walls).in_set(ControlLogicSet::Detect),
            );
    }
}
