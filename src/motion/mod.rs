//! Motion domain: run acceleration, eight-way dash, and wall sliding.

mod components;
mod events;
mod systems;

pub use components::{
    approach, snap_to_compass, DashHandler, MovementHandler, SpeedBucket, WallHandler,
    WallJumpLock,
};
pub use events::{DashEndedEvent, DashStartedEvent, WallSlideEndedEvent, WallSlideStartedEvent};

use bevy::prelude::*;

use crate::{ControlLogicSet, ControlPhysicsSet};

pub struct MotionPlugin;

impl Plugin for MotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DashStartedEvent>()
            .add_message::<DashEndedEvent>()
            .add_message::<WallSlideStartedEvent>()
            .add_message::<WallSlideEndedEvent>()
            .add_systems(
                Update,
                systems::tick_wall_jump_lock.in_set(ControlLogicSet::Timers),
            )
            .add_systems(
                Update,
                (
                    systems::start_dash,
                    systems::end_expired_dashes,
                    systems::rearm_dashes_on_landing,
                    systems::update_wall_slide,
                    systems::update_facing,
                )
                    .chain()
                    .in_set(ControlLogicSet::Actions),
            )
            .add_systems(
                FixedUpdate,
                (
                    systems::issue_movement_requests,
                    systems::sustain_dash,
                    systems::clamp_wall_slide,
                )
                    .in_set(ControlPhysicsSet::Requests),
            );
    }
}
