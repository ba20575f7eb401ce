//! Turn domain: the system advancing an active battle.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::turn::{BattleTurnMachine, TurnChangedEvent};

/// Tick the sequencer when a battle is active and forward its phase
/// transitions. No resource means no battle; the system idles.
pub(crate) fn advance_battle(
    time: Res<Time>,
    machine: Option<ResMut<BattleTurnMachine>>,
    mut changed: MessageWriter<TurnChangedEvent>,
) {
    let Some(mut machine) = machine else {
        return;
    };

    machine.tick(time.delta_secs());

    let round = machine.context().round;
    for transition in machine.drain_transitions() {
        changed.write(TurnChangedEvent {
            from: transition.from,
            to: transition.to,
            round,
        });
    }
}
