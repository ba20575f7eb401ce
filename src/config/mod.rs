//! Config domain: tuning resources, RON loading, and validation.

mod loader;
mod resources;
mod validation;

pub use loader::{ConfigLoadError, ControlConfigFile, load_control_config};
pub use resources::{
    DashTuning, DetectionTuning, JumpTuning, LocomotionTuning, VelocityLimits, WallTuning,
};
pub use validation::{TuningValidationError, validate_tuning};

pub use crate::gravity::GravityTuning;

use std::path::Path;

use bevy::prelude::*;

/// The full tuning set the control layer runs on.
#[derive(Debug, Clone, Default)]
pub struct ControlConfig {
    pub locomotion: LocomotionTuning,
    pub jump: JumpTuning,
    pub dash: DashTuning,
    pub wall: WallTuning,
    pub gravity: GravityTuning,
    pub detection: DetectionTuning,
    pub limits: VelocityLimits,
}

impl ControlConfig {
    /// Load a RON config file, merging it over the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        load_control_config(path)
    }

    /// Insert every section as its own resource.
    pub fn install(&self, app: &mut App) {
        app.insert_resource(self.locomotion.clone())
            .insert_resource(self.jump.clone())
            .insert_resource(self.dash.clone())
            .insert_resource(self.wall.clone())
            .insert_resource(self.gravity.clone())
            .insert_resource(self.detection.clone())
            .insert_resource(self.limits.clone());
    }
}
