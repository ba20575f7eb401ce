//! Detect domain: default raycast probes.
//!
//! These systems are reference detectors built on avian2d's spatial
//! queries; a host with its own detection can skip them and write
//! [`GroundContact`] / [`WallContactState`] directly.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::actor::{CharacterBody, GameLayer};
use crate::config::DetectionTuning;
use crate::detect::{
    GroundContact, GroundEnteredEvent, GroundExitedEvent, SurfaceProbe, WallContactState,
    WallEnteredEvent, WallExitedEvent, WallSide, classify_normal,
};

/// Half extents of a character's collider, for ray origin placement.
fn collider_half_extents(collider: &Collider) -> Vec2 {
    match collider.shape_scaled().as_cuboid() {
        Some(c) => Vec2::new(c.half_extents.x, c.half_extents.y),
        None => Vec2::new(12.0, 24.0),
    }
}

/// Directional surface query: cast one ray and classify what it hits.
pub fn check_direction(
    spatial_query: &SpatialQuery,
    origin: Vec2,
    direction: Dir2,
    distance: f32,
    slope_threshold: f32,
) -> SurfaceProbe {
    let filter = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);
    match spatial_query.cast_ray(origin, direction, distance, true, &filter) {
        Some(hit) => SurfaceProbe {
            has_collision: true,
            surface: classify_normal(hit.normal, slope_threshold),
            normal: hit.normal,
        },
        None => SurfaceProbe::miss(),
    }
}

/// Fan `ray_count` short rays down across the character's feet.
pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    tuning: Res<DetectionTuning>,
    mut entered: MessageWriter<GroundEnteredEvent>,
    mut exited: MessageWriter<GroundExitedEvent>,
    mut query: Query<(Entity, &Transform, &Collider, &mut GroundContact), With<CharacterBody>>,
) {
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for (entity, transform, collider, mut contact) in &mut query {
        let was_grounded = contact.grounded;
        let half = collider_half_extents(collider);
        let feet = transform.translation.truncate() - Vec2::new(0.0, half.y);

        let count = tuning.ground_ray_count.max(1) as u32;
        let mut hit_any = false;
        for i in 0..count {
            // Spread rays from left edge to right edge of the feet.
            let t = if count == 1 {
                0.5
            } else {
                i as f32 / (count - 1) as f32
            };
            let origin = feet + Vec2::new((t - 0.5) * 2.0 * half.x * 0.9, 0.0);
            if spatial_query
                .cast_ray(
                    origin,
                    Dir2::NEG_Y,
                    tuning.ground_ray_length,
                    true,
                    &ground_filter,
                )
                .is_some()
            {
                hit_any = true;
                break;
            }
        }

        contact.grounded = hit_any;

        if contact.grounded && !was_grounded {
            debug!("ground entered: {entity:?}");
            entered.write(GroundEnteredEvent { entity });
        } else if !contact.grounded && was_grounded {
            debug!("ground exited: {entity:?}");
            exited.write(GroundExitedEvent { entity });
        }
    }
}

/// Probe both sides of the character for wall contact.
pub(crate) fn detect_walls(
    spatial_query: SpatialQuery,
    tuning: Res<DetectionTuning>,
    mut entered: MessageWriter<WallEnteredEvent>,
    mut exited: MessageWriter<WallExitedEvent>,
    mut query: Query<(Entity, &Transform, &Collider, &mut WallContactState), With<CharacterBody>>,
) {
    let wall_filter = SpatialQueryFilter::from_mask(GameLayer::Wall);

    for (entity, transform, collider, mut contact) in &mut query {
        let was_side = contact.side;
        let half = collider_half_extents(collider);
        let center = transform.translation.truncate();
        let reach = half.x + tuning.wall_ray_length;

        let count = tuning.wall_ray_count.max(1) as u32;
        let mut side_hit = |dir: Dir2| -> bool {
            for i in 0..count {
                let t = if count == 1 {
                    0.5
                } else {
                    i as f32 / (count - 1) as f32
                };
                let origin = center + Vec2::new(0.0, (t - 0.5) * 2.0 * half.y * 0.8);
                if spatial_query
                    .cast_ray(origin, dir, reach, true, &wall_filter)
                    .is_some()
                {
                    return true;
                }
            }
            false
        };

        let left = side_hit(Dir2::NEG_X);
        let right = side_hit(Dir2::X);

        contact.side = match (left, right) {
            (true, false) => WallSide::Left,
            (false, true) => WallSide::Right,
            // Both or neither: no usable wall.
            _ => WallSide::None,
        };

        if contact.side != WallSide::None && contact.side != was_side {
            debug!("wall entered: {entity:?} side {:?}", contact.side);
            entered.write(WallEnteredEvent {
                entity,
                side: contact.side,
            });
        } else if contact.side == WallSide::None && was_side != WallSide::None {
            debug!("wall exited: {entity:?}");
            exited.write(WallExitedEvent { entity });
        }
    }
}
