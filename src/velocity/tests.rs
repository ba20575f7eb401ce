//! Velocity domain: unit tests for request arbitration.

use bevy::prelude::*;

use super::{Priority, RequestKind, VelocityPipeline, VelocityRequest};
use crate::config::VelocityLimits;

const DT: f32 = 1.0 / 60.0;

fn limits() -> VelocityLimits {
    VelocityLimits {
        max_horizontal_speed: 1000.0,
        max_vertical_speed: 1000.0,
        terminal_velocity: 1400.0,
    }
}

/// Resolve with gravity off and the body grounded, isolating arbitration.
fn resolve_flat(pipeline: &mut VelocityPipeline, current: Vec2) -> Vec2 {
    pipeline.resolve(current, 0.0, true, DT, &limits()).0
}

#[test]
fn test_highest_priority_set_wins_per_axis() {
    let mut pipeline = VelocityPipeline::default();
    pipeline.request(VelocityRequest::set_x(50.0, "background", Priority::BACKGROUND));
    pipeline.request(VelocityRequest::set_x(120.0, "movement", Priority::MOVEMENT));
    pipeline.request(VelocityRequest::set_x(300.0, "dash", Priority::DASH));

    let out = resolve_flat(&mut pipeline, Vec2::ZERO);
    assert_eq!(out.x, 300.0);
}

#[test]
fn test_equal_priority_set_last_registered_wins() {
    let mut pipeline = VelocityPipeline::default();
    pipeline.request(VelocityRequest::set_x(10.0, "first", Priority::MOVEMENT));
    pipeline.request(VelocityRequest::set_x(20.0, "second", Priority::MOVEMENT));
    pipeline.request(VelocityRequest::set_x(30.0, "third", Priority::MOVEMENT));

    let out = resolve_flat(&mut pipeline, Vec2::ZERO);
    assert_eq!(out.x, 30.0);
}

#[test]
fn test_override_excludes_set_add_and_forces_on_its_axes() {
    let mut pipeline = VelocityPipeline::default();
    pipeline.set_force("wind", Vec2::new(500.0, 500.0));
    pipeline.request(VelocityRequest::set_x(999.0, "movement", Priority::OVERRIDE));
    pipeline.request(VelocityRequest::new(
        RequestKind::Add,
        Vec2::new(100.0, 100.0),
        "boost",
        Priority::MOVEMENT,
    ));
    pipeline.request(VelocityRequest::new(
        RequestKind::Override,
        Vec2::new(900.0, 0.0),
        "dash",
        Priority::DASH,
    ));

    let out = resolve_flat(&mut pipeline, Vec2::new(5.0, 5.0));
    assert_eq!(out, Vec2::new(900.0, 0.0));
}

#[test]
fn test_override_ties_last_registered_wins() {
    let mut pipeline = VelocityPipeline::default();
    pipeline.request(VelocityRequest::new(
        RequestKind::Override,
        Vec2::new(100.0, 0.0),
        "dash",
        Priority::DASH,
    ));
    pipeline.request(VelocityRequest::new(
        RequestKind::Override,
        Vec2::new(-100.0, 0.0),
        "dash-again",
        Priority::DASH,
    ));

    let out = resolve_flat(&mut pipeline, Vec2::ZERO);
    assert_eq!(out.x, -100.0);
}

#[test]
fn test_knockback_outranks_dash() {
    let mut pipeline = VelocityPipeline::default();
    pipeline.dash(Vec2::new(900.0, 0.0));
    pipeline.knockback(Vec2::new(-400.0, 200.0));

    let out = resolve_flat(&mut pipeline, Vec2::ZERO);
    assert_eq!(out, Vec2::new(-400.0, 200.0));
}

#[test]
fn test_axis_independence() {
    let mut pipeline = VelocityPipeline::default();
    pipeline.request(VelocityRequest::set_x(80.0, "movement", Priority::MOVEMENT));
    pipeline.request(VelocityRequest::set_y(-30.0, "wall-slide", Priority::MOVEMENT));

    let out = resolve_flat(&mut pipeline, Vec2::new(0.0, 7.0));
    assert_eq!(out, Vec2::new(80.0, -30.0));
}

#[test]
fn test_untouched_axis_keeps_previous_velocity() {
    let mut pipeline = VelocityPipeline::default();
    pipeline.request(VelocityRequest::set_x(60.0, "movement", Priority::MOVEMENT));

    let out = resolve_flat(&mut pipeline, Vec2::new(-10.0, 42.0));
    assert_eq!(out, Vec2::new(60.0, 42.0));
}

#[test]
fn test_adds_stack_on_top_of_winning_set() {
    let mut pipeline = VelocityPipeline::default();
    pipeline.request(VelocityRequest::set_x(100.0, "movement", Priority::MOVEMENT));
    pipeline.request(VelocityRequest::new(
        RequestKind::Add,
        Vec2::new(25.0, 0.0),
        "conveyor",
        Priority::BACKGROUND,
    ));
    pipeline.request(VelocityRequest::new(
        RequestKind::Add,
        Vec2::new(-5.0, 0.0),
        "headwind",
        Priority::BACKGROUND,
    ));

    let out = resolve_flat(&mut pipeline, Vec2::ZERO);
    assert_eq!(out.x, 120.0);
}

#[test]
fn test_force_idempotence_same_tag_overwrites() {
    let mut pipeline = VelocityPipeline::default();
    pipeline.set_force("wind", Vec2::new(10.0, 0.0));
    pipeline.set_force("wind", Vec2::new(30.0, 0.0));

    let out = resolve_flat(&mut pipeline, Vec2::ZERO);
    assert_eq!(out.x, 30.0);
    assert_eq!(pipeline.force("wind"), Some(Vec2::new(30.0, 0.0)));
}

#[test]
fn test_forces_persist_across_steps_until_removed() {
    let mut pipeline = VelocityPipeline::default();
    pipeline.set_force("wind", Vec2::new(10.0, 0.0));

    assert_eq!(resolve_flat(&mut pipeline, Vec2::ZERO).x, 10.0);
    assert_eq!(resolve_flat(&mut pipeline, Vec2::ZERO).x, 10.0);

    pipeline.remove_force("wind");
    assert_eq!(resolve_flat(&mut pipeline, Vec2::ZERO).x, 0.0);
}

#[test]
fn test_one_shot_requests_cleared_after_resolve() {
    let mut pipeline = VelocityPipeline::default();
    pipeline.request(VelocityRequest::set_x(60.0, "movement", Priority::MOVEMENT));
    assert_eq!(pipeline.pending_requests(), 1);

    resolve_flat(&mut pipeline, Vec2::ZERO);
    assert_eq!(pipeline.pending_requests(), 0);
    assert_eq!(resolve_flat(&mut pipeline, Vec2::ZERO).x, 0.0);
}

#[test]
fn test_gravity_applies_only_when_airborne() {
    let mut pipeline = VelocityPipeline::default();
    let grounded = pipeline.resolve(Vec2::ZERO, 1800.0, true, DT, &limits()).0;
    assert_eq!(grounded.y, 0.0);

    let airborne = pipeline.resolve(Vec2::ZERO, 1800.0, false, DT, &limits()).0;
    assert!((airborne.y - (-1800.0 * DT)).abs() < 1e-4);
}

#[test]
fn test_gravity_disabled_flag_is_honored() {
    let mut pipeline = VelocityPipeline::default();
    pipeline.gravity_enabled = false;
    let out = pipeline.resolve(Vec2::ZERO, 1800.0, false, DT, &limits()).0;
    assert_eq!(out.y, 0.0);
}

#[test]
fn test_override_on_y_suppresses_gravity_for_the_step() {
    let mut pipeline = VelocityPipeline::default();
    pipeline.dash(Vec2::new(900.0, 0.0));
    let out = pipeline.resolve(Vec2::ZERO, 1800.0, false, DT, &limits()).0;
    assert_eq!(out.y, 0.0);
}

#[test]
fn test_winning_set_y_is_not_eroded_by_gravity() {
    // A wall-slide clamp resolves to exactly its value on an airborne
    // body; gravity only integrates on steps where nothing set the axis.
    let mut pipeline = VelocityPipeline::default();
    pipeline.request(VelocityRequest::set_y(-100.0, "wall-slide", Priority::MOVEMENT));
    let out = pipeline
        .resolve(Vec2::new(0.0, -104.0), 400.0, false, DT, &limits())
        .0;
    assert_eq!(out.y, -100.0);
}

#[test]
fn test_axis_locks_zero_the_locked_axis() {
    let mut pipeline = VelocityPipeline::default();
    pipeline.lock_x = true;
    pipeline.request(VelocityRequest::set_x(300.0, "movement", Priority::MOVEMENT));

    let out = resolve_flat(&mut pipeline, Vec2::new(50.0, 9.0));
    assert_eq!(out.x, 0.0);
    assert_eq!(out.y, 9.0);
}

#[test]
fn test_speed_clamps() {
    let mut pipeline = VelocityPipeline::default();
    pipeline.request(VelocityRequest::new(
        RequestKind::Set,
        Vec2::new(5000.0, -9000.0),
        "launch",
        Priority::OVERRIDE,
    ));

    let out = resolve_flat(&mut pipeline, Vec2::ZERO);
    assert_eq!(out.x, 1000.0);
    assert_eq!(out.y, -1400.0);
}

#[test]
fn test_change_detection_ignores_jitter() {
    let mut pipeline = VelocityPipeline::default();
    let current = Vec2::new(10.0, 0.0);
    pipeline.request(VelocityRequest::set_x(10.0000001, "movement", Priority::MOVEMENT));
    let (_, changed) = pipeline.resolve(current, 0.0, true, DT, &limits());
    assert!(!changed);

    pipeline.request(VelocityRequest::set_x(25.0, "movement", Priority::MOVEMENT));
    let (_, changed) = pipeline.resolve(current, 0.0, true, DT, &limits());
    assert!(changed);
}

#[test]
fn test_stop_zeroes_both_axes_over_lower_bands() {
    let mut pipeline = VelocityPipeline::default();
    pipeline.request(VelocityRequest::set_x(200.0, "movement", Priority::MOVEMENT));
    pipeline.jump(680.0);
    pipeline.stop();

    let out = resolve_flat(&mut pipeline, Vec2::new(150.0, -90.0));
    assert_eq!(out, Vec2::ZERO);
}

#[test]
fn test_request_affecting_no_axis_is_dropped() {
    let mut pipeline = VelocityPipeline::default();
    pipeline.request(VelocityRequest {
        kind: RequestKind::Set,
        vector: Vec2::new(99.0, 99.0),
        source: "bogus",
        priority: Priority::OVERRIDE,
        affects_x: false,
        affects_y: false,
    });
    assert_eq!(pipeline.pending_requests(), 0);
}
