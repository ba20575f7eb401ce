//! Velocity domain: the once-per-physics-tick resolver.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::actor::CharacterBody;
use crate::config::VelocityLimits;
use crate::detect::GroundContact;
use crate::gravity::{GravityState, GravityTuning};
use crate::velocity::{VelocityChangedEvent, VelocityPipeline};

/// Resolve each body's pending requests and write its velocity.
///
/// This is the only system in the crate that writes `LinearVelocity`.
pub(crate) fn resolve_velocity(
    time: Res<Time>,
    limits: Res<VelocityLimits>,
    gravity_tuning: Res<GravityTuning>,
    mut changed: MessageWriter<VelocityChangedEvent>,
    mut query: Query<
        (
            Entity,
            &mut VelocityPipeline,
            &mut LinearVelocity,
            &GravityState,
            &GroundContact,
        ),
        With<CharacterBody>,
    >,
) {
    let dt = time.delta_secs();

    for (entity, mut pipeline, mut velocity, gravity, contact) in &mut query {
        let previous = velocity.0;
        let magnitude = gravity.current_gravity(&gravity_tuning);
        let (resolved, delta_exceeds_epsilon) =
            pipeline.resolve(previous, magnitude, contact.grounded, dt, &limits);

        velocity.0 = resolved;

        if delta_exceeds_epsilon {
            changed.write(VelocityChangedEvent {
                entity,
                previous,
                current: resolved,
            });
        }
    }
}
