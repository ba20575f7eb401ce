//! Gravity regimes: a state-keyed lookup from the character's current
//! vertical situation to a gravity magnitude.
//!
//! The regime is mutated exclusively by the jump and wall handlers and read
//! every physics tick by the velocity resolver. It has no timers of its
//! own; apex detection and the like live with the subsystems that own the
//! relevant timers.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Which gravity curve is currently in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GravityRegime {
    /// Grounded or unclassified airborne motion.
    #[default]
    Normal,
    /// Rising with the jump input still held.
    JumpHold,
    /// Rising after the jump input was released early.
    JumpCut,
    /// Descending.
    Falling,
    /// Hovering near the top of a jump arc.
    Apex,
    /// Pressed against a wall while descending.
    WallSliding,
}

/// Per-character gravity regime. Reset to [`GravityRegime::Normal`] on
/// landing.
#[derive(Component, Debug, Default)]
pub struct GravityState {
    regime: GravityRegime,
}

impl GravityState {
    pub fn regime(&self) -> GravityRegime {
        self.regime
    }

    pub fn set_regime(&mut self, regime: GravityRegime) {
        if self.regime != regime {
            debug!("gravity regime {:?} -> {:?}", self.regime, regime);
            self.regime = regime;
        }
    }

    /// Current gravity magnitude under the given tuning.
    pub fn current_gravity(&self, tuning: &GravityTuning) -> f32 {
        tuning.magnitude(self.regime)
    }
}

/// Gravity magnitudes per regime, plus apex detection parameters used by
/// the jump subsystem.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct GravityTuning {
    pub normal: f32,
    pub jump_hold: f32,
    pub jump_cut: f32,
    pub falling: f32,
    pub apex: f32,
    pub wall_sliding: f32,
    /// `|vy|` below which the character counts as at the jump apex.
    pub apex_threshold: f32,
    /// Longest the apex regime may last before reverting to falling.
    pub apex_duration: f32,
}

impl Default for GravityTuning {
    fn default() -> Self {
        Self {
            normal: 1800.0,
            jump_hold: 900.0,
            jump_cut: 2600.0,
            falling: 2200.0,
            apex: 600.0,
            wall_sliding: 400.0,
            apex_threshold: 40.0,
            apex_duration: 0.1,
        }
    }
}

impl GravityTuning {
    pub fn magnitude(&self, regime: GravityRegime) -> f32 {
        match regime {
            GravityRegime::Normal => self.normal,
            GravityRegime::JumpHold => self.jump_hold,
            GravityRegime::JumpCut => self.jump_cut,
            GravityRegime::Falling => self.falling,
            GravityRegime::Apex => self.apex,
            GravityRegime::WallSliding => self.wall_sliding,
        }
    }
}
