//! Velocity domain: priority-based request resolution.
//!
//! Handlers submit [`VelocityRequest`]s tagged with a source and priority;
//! [`systems::resolve_velocity`] arbitrates them once per physics tick into
//! a single velocity written to the body. See `VelocityPipeline::resolve`
//! for the fixed arbitration order.

mod components;
mod events;
mod systems;
#[cfg(test)]
mod tests;

pub use components::{
    CHANGE_EPSILON, Priority, RequestKind, VelocityPipeline, VelocityRequest,
};
pub use events::VelocityChangedEvent;

use bevy::prelude::*;

use crate::ControlPhysicsSet;

pub struct VelocityPlugin;

impl Plugin for VelocityPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<VelocityChangedEvent>().add_systems(
            FixedUpdate,
            systems::resolve_velocity.in_set(ControlPhysicsSet::Resolve),
        );
    }
}
