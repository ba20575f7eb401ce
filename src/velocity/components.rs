//! Velocity domain: request types and the per-body pipeline.

use bevy::prelude::*;

use crate::config::VelocityLimits;

/// Velocity deltas smaller than this do not count as a change when diffing
/// for change events; avoids event storms from floating-point jitter.
pub const CHANGE_EPSILON: f32 = 1e-3;

/// How a request combines with the rest of the step's requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Wins outright on its affected axes; all Set/Add/force processing is
    /// skipped there. Reserved for mutually-exclusive actions (dash,
    /// knockback).
    Override,
    /// Replaces the axis value; highest priority wins per axis.
    Set,
    /// Contributes additively after the winning Set.
    Add,
}

/// Ordered priority scale. Bands leave room for in-between values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Priority(pub i32);

impl Priority {
    pub const BACKGROUND: Priority = Priority(0);
    pub const MOVEMENT: Priority = Priority(100);
    pub const JUMP: Priority = Priority(200);
    pub const DASH: Priority = Priority(300);
    pub const KNOCKBACK: Priority = Priority(400);
    pub const OVERRIDE: Priority = Priority(500);
}

/// A one-shot velocity directive for the current physics step.
///
/// Immutable once created; many are produced and discarded within a single
/// step. A request must affect at least one axis.
#[derive(Debug, Clone, Copy)]
pub struct VelocityRequest {
    pub kind: RequestKind,
    pub vector: Vec2,
    pub source: &'static str,
    pub priority: Priority,
    pub affects_x: bool,
    pub affects_y: bool,
}

impl VelocityRequest {
    pub fn new(kind: RequestKind, vector: Vec2, source: &'static str, priority: Priority) -> Self {
        Self {
            kind,
            vector,
            source,
            priority,
            affects_x: true,
            affects_y: true,
        }
    }

    /// Set request touching only the horizontal axis.
    pub fn set_x(value: f32, source: &'static str, priority: Priority) -> Self {
        Self {
            kind: RequestKind::Set,
            vector: Vec2::new(value, 0.0),
            source,
            priority,
            affects_x: true,
            affects_y: false,
        }
    }

    /// Set request touching only the vertical axis.
    pub fn set_y(value: f32, source: &'static str, priority: Priority) -> Self {
        Self {
            kind: RequestKind::Set,
            vector: Vec2::new(0.0, value),
            source,
            priority,
            affects_x: false,
            affects_y: true,
        }
    }
}

/// Priority-arbitrated velocity pipeline for one physics body.
///
/// The pipeline is the *only* writer of the body's `LinearVelocity`; every
/// other subsystem requests changes through it. One-shot requests live for
/// a single [`VelocityPipeline::resolve`]; persistent forces stay until
/// removed and are overwritten, not accumulated, when a source re-registers
/// under the same tag.
#[derive(Component, Debug)]
pub struct VelocityPipeline {
    requests: Vec<VelocityRequest>,
    forces: Vec<(&'static str, Vec2)>,
    /// Gravity contribution toggle for hosts that take over the vertical
    /// axis (ladders, swimming). Dashes need no toggle: their Override
    /// owns the axis and gravity skips it.
    pub gravity_enabled: bool,
    /// Hard constraint: zero the horizontal axis after resolution.
    pub lock_x: bool,
    /// Hard constraint: zero the vertical axis after resolution.
    pub lock_y: bool,
}

impl Default for VelocityPipeline {
    fn default() -> Self {
        Self {
            requests: Vec::new(),
            forces: Vec::new(),
            gravity_enabled: true,
            lock_x: false,
            lock_y: false,
        }
    }
}

impl VelocityPipeline {
    /// Enqueue a one-shot request for the current step.
    ///
    /// A request affecting neither axis is meaningless and is dropped with
    /// a log instead of corrupting resolution.
    pub fn request(&mut self, request: VelocityRequest) {
        if !request.affects_x && !request.affects_y {
            warn!(
                "dropping velocity request from '{}': affects no axis",
                request.source
            );
            return;
        }
        self.requests.push(request);
    }

    /// Register or overwrite a persistent additive force under `tag`.
    pub fn set_force(&mut self, tag: &'static str, vector: Vec2) {
        if let Some(entry) = self.forces.iter_mut().find(|(t, _)| *t == tag) {
            entry.1 = vector;
        } else {
            self.forces.push((tag, vector));
        }
    }

    /// Remove the persistent force registered under `tag`, if any.
    pub fn remove_force(&mut self, tag: &'static str) {
        self.forces.retain(|(t, _)| *t != tag);
    }

    pub fn force(&self, tag: &'static str) -> Option<Vec2> {
        self.forces
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, v)| *v)
    }

    pub fn pending_requests(&self) -> usize {
        self.requests.len()
    }

    // Convenience constructions, documented as specific (kind, priority)
    // requests so callers never hand-roll priorities.

    /// Horizontal locomotion: Set-X at the Movement band.
    pub fn move_horizontal(&mut self, vx: f32) {
        self.request(VelocityRequest::set_x(vx, "movement", Priority::MOVEMENT));
    }

    /// Jump launch: Set-Y at the Jump band.
    pub fn jump(&mut self, vy: f32) {
        self.request(VelocityRequest::set_y(vy, "jump", Priority::JUMP));
    }

    /// Dash: Override at the Dash band, owning both axes.
    pub fn dash(&mut self, velocity: Vec2) {
        self.request(VelocityRequest::new(
            RequestKind::Override,
            velocity,
            "dash",
            Priority::DASH,
        ));
    }

    /// Knockback: Override one band above dash, so a hit interrupts an
    /// in-progress dash.
    pub fn knockback(&mut self, velocity: Vec2) {
        self.request(VelocityRequest::new(
            RequestKind::Override,
            velocity,
            "knockback",
            Priority::KNOCKBACK,
        ));
    }

    /// Hard stop: Set zero on both axes at the top band.
    pub fn stop(&mut self) {
        self.request(VelocityRequest::new(
            RequestKind::Set,
            Vec2::ZERO,
            "stop",
            Priority::OVERRIDE,
        ));
    }

    /// Resolve the step's requests into a new velocity.
    ///
    /// Runs the fixed arbitration order: Override winner (highest priority,
    /// ties broken last-registered-wins), then per axis the winning Set
    /// (highest priority, equal priorities resolved to the last registered
    /// request), plus one-shot Adds and persistent forces, then gravity on
    /// airborne bodies whose vertical axis no request owned this step,
    /// then axis locks and speed clamps. One-shot requests are cleared; an
    /// axis nothing applied to keeps its previous velocity.
    ///
    /// Returns the resolved velocity and whether it differs from `current`
    /// by more than [`CHANGE_EPSILON`].
    pub fn resolve(
        &mut self,
        current: Vec2,
        gravity: f32,
        grounded: bool,
        dt: f32,
        limits: &VelocityLimits,
    ) -> (Vec2, bool) {
        let mut out = current;

        // Step 2: Override winner owns its axes outright.
        let mut winner: Option<&VelocityRequest> = None;
        for request in &self.requests {
            if request.kind != RequestKind::Override {
                continue;
            }
            if winner.is_none_or(|w| request.priority >= w.priority) {
                winner = Some(request);
            }
        }
        let (override_x, override_y) = match winner {
            Some(w) => {
                if w.affects_x {
                    out.x = w.vector.x;
                }
                if w.affects_y {
                    out.y = w.vector.y;
                }
                (w.affects_x, w.affects_y)
            }
            None => (false, false),
        };

        // Step 3: per-axis winning Set. Scanning with `>=` makes the last
        // registered request win among equal top priorities. A Set that
        // wins the vertical axis owns its value for the step: gravity is
        // not layered on top, so a wall-slide clamp of -wall_slide_speed
        // resolves to exactly that and a jump launches at exactly its
        // requested speed.
        let mut set_y_won = false;
        if !override_x {
            let mut set: Option<&VelocityRequest> = None;
            for request in &self.requests {
                if request.kind == RequestKind::Set
                    && request.affects_x
                    && set.is_none_or(|s| request.priority >= s.priority)
                {
                    set = Some(request);
                }
            }
            if let Some(s) = set {
                out.x = s.vector.x;
            }
        }
        if !override_y {
            let mut set: Option<&VelocityRequest> = None;
            for request in &self.requests {
                if request.kind == RequestKind::Set
                    && request.affects_y
                    && set.is_none_or(|s| request.priority >= s.priority)
                {
                    set = Some(request);
                }
            }
            if let Some(s) = set {
                out.y = s.vector.y;
                set_y_won = true;
            }
        }

        // Steps 4-5: additive one-shots, then persistent forces, in
        // registration order so float summation stays reproducible.
        for request in &self.requests {
            if request.kind != RequestKind::Add {
                continue;
            }
            if request.affects_x && !override_x {
                out.x += request.vector.x;
            }
            if request.affects_y && !override_y {
                out.y += request.vector.y;
            }
        }
        for (_, force) in &self.forces {
            if !override_x {
                out.x += force.x;
            }
            if !override_y {
                out.y += force.y;
            }
        }

        // Step 6: gravity, unless grounded, disabled, or a request
        // (Override or winning Set) owns the vertical axis this step.
        if !grounded && self.gravity_enabled && !override_y && !set_y_won {
            out.y -= gravity * dt;
        }

        // Step 7: hard constraints.
        if self.lock_x {
            out.x = 0.0;
        }
        if self.lock_y {
            out.y = 0.0;
        }
        out.x = out
            .x
            .clamp(-limits.max_horizontal_speed, limits.max_horizontal_speed);
        out.y = out.y.clamp(-limits.terminal_velocity, limits.max_vertical_speed);

        self.requests.clear();

        let changed = (out - current).length() > CHANGE_EPSILON;
        (out, changed)
    }
}
