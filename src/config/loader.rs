//! Config domain: RON config file loading.
//!
//! Every section is optional; omitted sections keep their defaults. The
//! file is read once at startup and failures surface as a `Result` so the
//! host fails fast rather than simulating with a half-applied config.

use std::fs;
use std::path::Path;

use ron::Options;
use serde::Deserialize;

use super::ControlConfig;
use super::resources::{
    DashTuning, DetectionTuning, JumpTuning, LocomotionTuning, VelocityLimits, WallTuning,
};
use crate::gravity::GravityTuning;

/// Error type for config loading failures.
#[derive(Debug)]
pub struct ConfigLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ConfigLoadError {}

/// On-disk shape of a control config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ControlConfigFile {
    pub locomotion: Option<LocomotionTuning>,
    pub jump: Option<JumpTuning>,
    pub dash: Option<DashTuning>,
    pub wall: Option<WallTuning>,
    pub gravity: Option<GravityTuning>,
    pub detection: Option<DetectionTuning>,
    pub limits: Option<VelocityLimits>,
}

/// RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Load a config file and merge it over the defaults.
pub fn load_control_config(path: &Path) -> Result<ControlConfig, ConfigLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ConfigLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    let file: ControlConfigFile = ron_options()
        .from_str(&contents)
        .map_err(|e| ConfigLoadError {
            file: file_name,
            message: format!("Parse error: {}", e),
        })?;

    let mut config = ControlConfig::default();
    if let Some(locomotion) = file.locomotion {
        config.locomotion = locomotion;
    }
    if let Some(jump) = file.jump {
        config.jump = jump;
    }
    if let Some(dash) = file.dash {
        config.dash = dash;
    }
    if let Some(wall) = file.wall {
        config.wall = wall;
    }
    if let Some(gravity) = file.gravity {
        config.gravity = gravity;
    }
    if let Some(detection) = file.detection {
        config.detection = detection;
    }
    if let Some(limits) = file.limits {
        config.limits = limits;
    }
    Ok(config)
}
