//! Jump domain: coyote time, jump buffering, variable height, and the
//! first-match jump executor.

mod actions;
mod components;
mod events;
mod systems;
#[cfg(test)]
mod tests;

pub use actions::{
    ActionError, AirJump, GroundJump, JumpAction, JumpActions, JumpContext, JumpKind, WallJump,
};
pub use components::{JumpPhase, JumpState, StampTimer};
pub use events::JumpExecutedEvent;

use bevy::prelude::*;

use crate::ControlLogicSet;

pub struct JumpPlugin;

impl Plugin for JumpPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<JumpExecutedEvent>()
            .add_systems(
                Update,
                systems::update_jump_timers.in_set(ControlLogicSet::Timers),
            )
            .add_systems(
                Update,
                (
                    systems::execute_buffered_jumps,
                    systems::apply_variable_jump,
                    systems::update_jump_phase,
                )
                    .chain()
                    .in_set(ControlLogicSet::Actions),
            );
    }
}
