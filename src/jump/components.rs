//! Jump domain: timestamp-derived timers and per-character jump state.

use bevy::prelude::*;

use crate::detect::WallSide;

/// A "time since last event" window timer.
///
/// Stores only the last event timestamp; "active" is derived as
/// `now - last <= window` on every query, so the flag and the timestamp can
/// never disagree.
#[derive(Debug, Clone, Copy, Default)]
pub struct StampTimer {
    last: Option<f64>,
}

impl StampTimer {
    /// Record that the event just happened.
    pub fn mark(&mut self, now: f64) {
        self.last = Some(now);
    }

    /// Forget the event entirely (consume the window).
    pub fn clear(&mut self) {
        self.last = None;
    }

    /// Whether the event happened within `window` seconds of `now`.
    pub fn is_within(&self, now: f64, window: f32) -> bool {
        match self.last {
            Some(last) => now - last <= f64::from(window),
            None => false,
        }
    }

    /// Seconds since the event, if it ever happened.
    pub fn elapsed(&self, now: f64) -> Option<f64> {
        self.last.map(|last| now - last)
    }
}

/// The jump handler's internal regime. Wall-sliding is a parallel regime
/// entered and exited by the wall handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpPhase {
    #[default]
    Grounded,
    Rising,
    Apex,
    Falling,
    WallSliding,
}

/// Per-character jump bookkeeping.
#[derive(Component, Debug, Default)]
pub struct JumpState {
    pub phase: JumpPhase,
    /// Last tick the character was grounded; drives coyote time.
    pub coyote: StampTimer,
    /// Last tick the character touched a wall; drives wall coyote time.
    pub wall_coyote: StampTimer,
    /// Last unhonored jump press; drives jump buffering.
    pub buffer: StampTimer,
    /// Last executed jump; enforces the minimum inter-jump interval.
    pub cooldown: StampTimer,
    /// When the apex regime was entered, bounding its duration.
    pub apex_entered: StampTimer,
    /// When the last ground jump launched; bounds the variable-jump window.
    pub variable_armed: StampTimer,
    /// Whether the variable-jump cut was already applied for this jump.
    pub variable_consumed: bool,
    pub air_jumps_remaining: u8,
    /// Side of the most recent wall contact, for wall-coyote jumps after
    /// the wall is lost.
    pub last_wall_side: WallSide,
}

impl JumpState {
    pub fn new(max_air_jumps: u8) -> Self {
        Self {
            air_jumps_remaining: max_air_jumps,
            ..Default::default()
        }
    }
}
