//! Config domain: cross-field validation of the installed tuning.

use super::ControlConfig;

/// A tuning validation error with context about what failed.
#[derive(Debug)]
pub struct TuningValidationError {
    pub section: &'static str,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for TuningValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}: {}", self.section, self.field, self.message)
    }
}

macro_rules! require {
    ($errors:expr, $section:expr, $field:expr, $cond:expr, $message:expr) => {
        if !$cond {
            $errors.push(TuningValidationError {
                section: $section,
                field: $field,
                message: $message.to_string(),
            });
        }
    };
}

/// Validate the full tuning set. Returns a list of errors, empty when the
/// configuration is safe to simulate.
pub fn validate_tuning(config: &ControlConfig) -> Vec<TuningValidationError> {
    let mut errors = Vec::new();

    let l = &config.locomotion;
    require!(errors, "locomotion", "run_speed", l.run_speed > 0.0, "must be positive");
    require!(errors, "locomotion", "acceleration", l.acceleration > 0.0, "must be positive");
    require!(errors, "locomotion", "deceleration", l.deceleration > 0.0, "must be positive");
    require!(errors, "locomotion", "turn_rate", l.turn_rate > 0.0, "must be positive");
    require!(
        errors,
        "locomotion",
        "air_multiplier",
        l.air_multiplier > 0.0 && l.air_multiplier <= 1.0,
        "must be in (0, 1]"
    );

    let j = &config.jump;
    require!(errors, "jump", "jump_power", j.jump_power > 0.0, "must be positive");
    require!(errors, "jump", "coyote_time", j.coyote_time >= 0.0, "must not be negative");
    require!(errors, "jump", "buffer_time", j.buffer_time >= 0.0, "must not be negative");
    require!(
        errors,
        "jump",
        "min_jump_interval",
        j.min_jump_interval >= 0.0,
        "must not be negative"
    );
    require!(
        errors,
        "jump",
        "variable_jump_factor",
        j.variable_jump_factor > 0.0 && j.variable_jump_factor < 1.0,
        "must be in (0, 1) or the cut does nothing"
    );
    require!(
        errors,
        "jump",
        "double_jump_multiplier",
        j.double_jump_multiplier > 0.0,
        "must be positive"
    );

    let d = &config.dash;
    require!(errors, "dash", "dash_speed", d.dash_speed > 0.0, "must be positive");
    require!(errors, "dash", "dash_duration", d.dash_duration > 0.0, "must be positive");
    require!(errors, "dash", "dash_cooldown", d.dash_cooldown >= 0.0, "must not be negative");

    let w = &config.wall;
    require!(errors, "wall", "wall_slide_speed", w.wall_slide_speed > 0.0, "must be positive");
    require!(
        errors,
        "wall",
        "wall_jump_vertical",
        w.wall_jump_vertical > 0.0,
        "must be positive"
    );

    let g = &config.gravity;
    for (field, value) in [
        ("normal", g.normal),
        ("jump_hold", g.jump_hold),
        ("jump_cut", g.jump_cut),
        ("falling", g.falling),
        ("apex", g.apex),
        ("wall_sliding", g.wall_sliding),
    ] {
        require!(errors, "gravity", field, value > 0.0, "must be positive");
    }
    require!(
        errors,
        "gravity",
        "apex_threshold",
        g.apex_threshold > 0.0,
        "must be positive"
    );

    let det = &config.detection;
    require!(
        errors,
        "detection",
        "ground_ray_count",
        det.ground_ray_count > 0,
        "must cast at least one ray"
    );
    require!(
        errors,
        "detection",
        "wall_ray_count",
        det.wall_ray_count > 0,
        "must cast at least one ray"
    );
    require!(
        errors,
        "detection",
        "slope_threshold",
        det.slope_threshold > 0.0 && det.slope_threshold < 1.0,
        "must be in (0, 1)"
    );

    let lim = &config.limits;
    require!(
        errors,
        "limits",
        "max_horizontal_speed",
        lim.max_horizontal_speed >= config.dash.dash_speed,
        "must not clamp below dash_speed"
    );
    require!(
        errors,
        "limits",
        "max_vertical_speed",
        lim.max_vertical_speed >= config.jump.jump_power,
        "must not clamp below jump_power"
    );
    require!(
        errors,
        "limits",
        "terminal_velocity",
        lim.terminal_velocity > 0.0,
        "must be positive"
    );

    errors
}
