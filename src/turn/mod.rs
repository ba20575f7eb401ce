//! Turn domain: a battle-turn sequencer on the state machine engine.
//!
//! Opt-in and independent of the character controller: hosts add
//! [`BattleTurnPlugin`], insert a [`BattleTurnMachine`] when a battle
//! starts, and mark player/enemy actions as they resolve.

mod components;
mod events;
mod systems;

pub use components::{BattleContext, BattleTurnMachine, TurnPhase};
pub use events::TurnChangedEvent;

use bevy::prelude::*;

pub struct BattleTurnPlugin;

impl Plugin for BattleTurnPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<TurnChangedEvent>()
            .add_systems(Update, systems::advance_battle);
    }
}
