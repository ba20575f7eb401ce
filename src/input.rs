//! Intent streams consumed by the handlers.
//!
//! The core never polls input devices. A host (or the `dev-tools` keyboard
//! sampler) writes [`ControlIntent`] each logic tick; handlers only read it.
//! Edge flags for jump and dash are latched: once set they stay set until
//! the consuming handler takes them, so a press is never lost to fixed
//! timestep scheduling.

use bevy::prelude::*;

/// Default activation threshold below which axis input is treated as zero.
pub const DEFAULT_ACTIVATION_THRESHOLD: f32 = 0.1;

/// Per-character-instance player intent for the current logic tick.
#[derive(Resource, Debug, Default)]
pub struct ControlIntent {
    /// Dead-zone-filtered movement axis, components in [-1, 1].
    pub axis: Vec2,
    /// Unfiltered directional vector, used for dash direction snapping.
    pub raw_axis: Vec2,
    /// Latched jump press edge; cleared by the jump buffer.
    pub jump_just_pressed: bool,
    /// Level state of the jump input, for variable jump height.
    pub jump_held: bool,
    /// Latched dash press edge; cleared by the dash handler.
    pub dash_just_pressed: bool,
}

impl ControlIntent {
    /// Write a new directional sample, applying the dead-zone filter.
    pub fn set_axis(&mut self, raw: Vec2) {
        self.raw_axis = raw;
        self.axis = apply_dead_zone(raw, DEFAULT_ACTIVATION_THRESHOLD);
    }

    /// Consume the latched jump edge.
    pub fn take_jump_pressed(&mut self) -> bool {
        std::mem::take(&mut self.jump_just_pressed)
    }

    /// Consume the latched dash edge.
    pub fn take_dash_pressed(&mut self) -> bool {
        std::mem::take(&mut self.dash_just_pressed)
    }
}

/// Zero out sub-threshold input so stick drift never registers as intent.
pub fn apply_dead_zone(value: Vec2, threshold: f32) -> Vec2 {
    if value.length() < threshold {
        Vec2::ZERO
    } else {
        value.clamp(Vec2::splat(-1.0), Vec2::splat(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dead_zone_filters_drift() {
        assert_eq!(apply_dead_zone(Vec2::new(0.05, 0.0), 0.1), Vec2::ZERO);
        assert_eq!(
            apply_dead_zone(Vec2::new(0.5, 0.0), 0.1),
            Vec2::new(0.5, 0.0)
        );
    }

    #[test]
    fn test_dead_zone_clamps_to_unit_range() {
        let filtered = apply_dead_zone(Vec2::new(2.0, -3.0), 0.1);
        assert_eq!(filtered, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_edges_latch_until_taken() {
        let mut intent = ControlIntent::default();
        intent.jump_just_pressed = true;
        assert!(intent.take_jump_pressed());
        assert!(!intent.take_jump_pressed());

        intent.dash_just_pressed = true;
        assert!(intent.take_dash_pressed());
        assert!(!intent.take_dash_pressed());
    }
}
