//! Dev-tools keyboard sampler, behind the `dev-tools` feature.
//!
//! Production hosts map their own devices into [`ControlIntent`]; this
//! sampler exists so demos and manual testing work out of the box.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::actor::CharacterBody;
use crate::detect::{GroundContact, WallContactState};
use crate::input::ControlIntent;
use crate::jump::JumpState;
use crate::motion::{DashHandler, WallHandler};
use crate::states::CharacterFsm;

pub(crate) fn read_keyboard_intent(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut intent: ResMut<ControlIntent>,
) {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Vertical axis (for dash direction)
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    intent.set_axis(Vec2::new(x, y));
    // |= keeps an edge latched until its handler takes it.
    intent.jump_just_pressed |=
        keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::KeyK);
    intent.jump_held = keyboard.pressed(KeyCode::Space) || keyboard.pressed(KeyCode::KeyK);
    intent.dash_just_pressed |=
        keyboard.just_pressed(KeyCode::ShiftLeft) || keyboard.just_pressed(KeyCode::KeyJ);
}

/// One-line state dump per character on F1, for eyeballing a live session.
pub(crate) fn dump_character_state(
    keyboard: Res<ButtonInput<KeyCode>>,
    query: Query<
        (
            Entity,
            &LinearVelocity,
            &GroundContact,
            &WallContactState,
            &JumpState,
            &DashHandler,
            &WallHandler,
            &CharacterFsm,
        ),
        With<CharacterBody>,
    >,
) {
    if !keyboard.just_pressed(KeyCode::F1) {
        return;
    }

    for (entity, velocity, contact, wall, jump, dash, wall_handler, fsm) in &query {
        info!(
            "{entity:?}: state={:?} v=({:.1}, {:.1}) grounded={} wall={:?} phase={:?} \
             air_jumps={} dashing={} sliding={}",
            fsm.machine.current(),
            velocity.x,
            velocity.y,
            contact.grounded,
            wall.side,
            jump.phase,
            jump.air_jumps_remaining,
            dash.dashing,
            wall_handler.sliding,
        );
    }
}
