//! Turn domain: the battle-turn sequencer built on the state machine engine.

use bevy::prelude::*;

use crate::fsm::{StateMachine, StateNode, Transition};

/// Phases of one battle. `EnemyTurn` covers the whole roster; the context
/// tracks which enemy is acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    BattleStart,
    PlayerTurn,
    EnemyTurn,
    BattleEnd,
}

/// Shared context the phase callbacks read and mutate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BattleContext {
    /// 1-based round counter; a round is one player turn plus the roster.
    pub round: u32,
    /// Index of the enemy currently acting.
    pub enemy_index: usize,
    pub enemy_count: usize,
    pub battle_over: bool,
    pub player_acted: bool,
    pub enemy_acted: bool,
}

/// The battle sequencer. Hosts insert it when a battle starts, mark actions
/// as they complete, and remove it after `BattleEnd`.
#[derive(Resource)]
pub struct BattleTurnMachine {
    machine: StateMachine<TurnPhase, BattleContext>,
    context: BattleContext,
}

impl BattleTurnMachine {
    pub fn new(enemy_count: usize) -> Self {
        let mut context = BattleContext {
            enemy_count,
            ..Default::default()
        };
        let mut machine = StateMachine::new();

        machine.add_state(
            StateNode::new(TurnPhase::BattleStart)
                .enter(|ctx: &mut BattleContext| {
                    ctx.round = 1;
                    info!("battle started: {} enemies", ctx.enemy_count);
                })
                .update(|ctx, _dt, transitions| {
                    if ctx.battle_over {
                        transitions.request(TurnPhase::BattleEnd);
                    } else {
                        transitions.request(TurnPhase::PlayerTurn);
                    }
                }),
            &mut context,
        );

        machine.add_state(
            StateNode::new(TurnPhase::PlayerTurn)
                .enter(|ctx: &mut BattleContext| {
                    ctx.player_acted = false;
                    debug!("round {}: player turn", ctx.round);
                })
                .update(|ctx, _dt, transitions| {
                    if ctx.battle_over {
                        transitions.request(TurnPhase::BattleEnd);
                    } else if ctx.player_acted {
                        transitions.request(TurnPhase::EnemyTurn);
                    }
                }),
            &mut context,
        );

        machine.add_state(
            StateNode::new(TurnPhase::EnemyTurn)
                .enter(|ctx: &mut BattleContext| {
                    ctx.enemy_index = 0;
                    ctx.enemy_acted = false;
                    debug!("round {}: enemy turns begin", ctx.round);
                })
                .update(|ctx, _dt, transitions| {
                    if ctx.battle_over {
                        transitions.request(TurnPhase::BattleEnd);
                        return;
                    }
                    // The roster advances inside the phase; the machine only
                    // transitions once every enemy has acted. An empty
                    // roster hands the turn straight back.
                    if ctx.enemy_acted {
                        ctx.enemy_acted = false;
                        ctx.enemy_index += 1;
                    }
                    if ctx.enemy_index >= ctx.enemy_count {
                        ctx.round += 1;
                        transitions.request(TurnPhase::PlayerTurn);
                    }
                }),
            &mut context,
        );

        machine.add_state(
            StateNode::new(TurnPhase::BattleEnd).enter(|ctx: &mut BattleContext| {
                info!("battle ended after {} round(s)", ctx.round);
            }),
            &mut context,
        );

        Self { machine, context }
    }

    pub fn phase(&self) -> TurnPhase {
        // Registration seeds BattleStart as current; it is never removed.
        self.machine.current().unwrap_or(TurnPhase::BattleEnd)
    }

    pub fn context(&self) -> &BattleContext {
        &self.context
    }

    /// Advance the sequencer one logic tick.
    pub fn tick(&mut self, dt: f32) {
        self.machine.tick(dt, &mut self.context);
    }

    /// The player's action for this turn finished.
    pub fn mark_player_acted(&mut self) {
        self.context.player_acted = true;
    }

    /// The acting enemy's action finished.
    pub fn mark_enemy_acted(&mut self) {
        self.context.enemy_acted = true;
    }

    /// Force the battle toward `BattleEnd` on the next tick, from any phase.
    pub fn end_battle(&mut self) {
        self.context.battle_over = true;
    }

    /// Phase transitions recorded since the last drain.
    pub fn drain_transitions(&mut self) -> Vec<Transition<TurnPhase>> {
        self.machine.drain_transitions()
    }
}
