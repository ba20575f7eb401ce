//! # `cliffside`
//!
//! A 2D platformer character-control layer for bevy + avian2d.
//!
//! The crate turns discrete player intent (move, jump, dash, wall-interact)
//! into a physics body's velocity through a priority-arbitrated request
//! pipeline, and drives a finite-state view of the character's current
//! action for animation and gameplay logic.
//!
//! Structure, leaf first:
//! - [`detect`]: ground/wall contact components with entered/exited events,
//!   plus default raycast probes a host may replace.
//! - [`velocity`]: the request pipeline. Handlers never write
//!   `LinearVelocity`; they submit Override/Set/Add requests that a single
//!   resolver system arbitrates once per physics tick.
//! - [`gravity`]: regime-tagged gravity magnitudes (held jump, cut jump,
//!   apex hover, wall slide) swapped by the jump and wall handlers.
//! - [`jump`]: coyote time, jump buffering, variable jump height, and an
//!   ordered first-match list of ground/wall/air jump actions.
//! - [`motion`]: horizontal movement, dash, and wall-slide handlers, each
//!   independently enable-gated.
//! - [`fsm`]: the generic reactive state machine engine.
//! - [`states`]: the movement state machine built on it.
//! - [`turn`]: a battle-turn sequencer built on the same engine.
//!
//! Two tick cadences map onto bevy schedules: `Update` is the logic tick
//! (input latching, timers, transition evaluation) and `FixedUpdate` is the
//! physics tick (request issuance and velocity resolution).

use bevy::prelude::*;

pub mod actor;
pub mod config;
pub mod detect;
pub mod fsm;
pub mod gravity;
pub mod input;
pub mod jump;
pub mod motion;
pub mod states;
pub mod turn;
pub mod velocity;

#[cfg(feature = "dev-tools")]
pub mod dev;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::actor::{CharacterBody, Facing, GameLayer, character_body};
    pub use crate::config::{
        ControlConfig, DashTuning, DetectionTuning, GravityTuning, JumpTuning, LocomotionTuning,
        VelocityLimits, WallTuning,
    };
    pub use crate::detect::{
        GroundContact, GroundEnteredEvent, GroundExitedEvent, SurfaceType, WallContactState,
        WallSide,
    };
    pub use crate::fsm::{StateMachine, StateNode, Transition};
    pub use crate::gravity::{GravityRegime, GravityState};
    pub use crate::input::ControlIntent;
    pub use crate::jump::{JumpExecutedEvent, JumpKind, JumpPhase, JumpState};
    pub use crate::motion::{
        DashEndedEvent, DashHandler, DashStartedEvent, MovementHandler, WallHandler, WallJumpLock,
        WallSlideEndedEvent, WallSlideStartedEvent,
    };
    pub use crate::states::{CharacterFsm, CharacterState, StateChangedEvent};
    pub use crate::turn::{BattleTurnMachine, BattleTurnPlugin, TurnChangedEvent, TurnPhase};
    pub use crate::velocity::{
        Priority, RequestKind, VelocityChangedEvent, VelocityPipeline, VelocityRequest,
    };
    pub use crate::{CharacterControlPlugin, ControlLogicSet, ControlPhysicsSet};
}

/// Logic-tick phases, run in `Update` in this order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlLogicSet {
    /// Ground/wall probes and contact edge events.
    Detect,
    /// Timer stamps, input latching, wall-jump lock countdown.
    Timers,
    /// Jump execution, variable jump, dash/wall lifecycle.
    Actions,
    /// Movement state machine evaluation and event emission.
    Fsm,
}

/// Physics-tick phases, run in `FixedUpdate` in this order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlPhysicsSet {
    /// Handlers translate intent into velocity requests.
    Requests,
    /// The pipeline resolves requests into the body's velocity.
    Resolve,
}

/// Composition root for the character-control layer.
///
/// Installs the tuning resources, the detector probes, the jump/motion
/// handlers, the velocity resolver, and the movement state machine. The
/// battle-turn sequencer is a separate, opt-in [`turn::BattleTurnPlugin`].
///
/// Tuning defaults can be replaced wholesale by loading a RON file:
///
/// ```no_run
/// use bevy::prelude::*;
/// use cliffside::prelude::*;
///
/// fn main() -> Result<(), cliffside::config::ConfigLoadError> {
///     let config = ControlConfig::load("assets/control.ron".as_ref())?;
///     App::new()
///         .add_plugins(CharacterControlPlugin::with_config(config))
///         .run();
///     Ok(())
/// }
/// ```
#[derive(Default)]
pub struct CharacterControlPlugin {
    config: Option<config::ControlConfig>,
}

impl CharacterControlPlugin {
    /// Build the plugin with an explicit, already-loaded configuration.
    pub fn with_config(config: config::ControlConfig) -> Self {
        Self {
            config: Some(config),
        }
    }
}

impl Plugin for CharacterControlPlugin {
    fn build(&self, app: &mut App) {
        let config = self.config.clone().unwrap_or_default();

        // A partially-wired controller is unsafe to simulate; refuse to
        // start rather than degrade silently.
        let problems = config::validate_tuning(&config);
        if !problems.is_empty() {
            for problem in &problems {
                error!("invalid control tuning: {problem}");
            }
            panic!(
                "character control configuration rejected with {} error(s)",
                problems.len()
            );
        }

        config.install(app);

        app.init_resource::<input::ControlIntent>()
            .configure_sets(
                Update,
                (
                    ControlLogicSet::Detect,
                    ControlLogicSet::Timers,
                    ControlLogicSet::Actions,
                    ControlLogicSet::Fsm,
                )
                    .chain(),
            )
            .configure_sets(
                FixedUpdate,
                (ControlPhysicsSet::Requests, ControlPhysicsSet::Resolve).chain(),
            )
            .add_plugins((
                detect::DetectPlugin,
                velocity::VelocityPlugin,
                jump::JumpPlugin,
                motion::MotionPlugin,
                states::StatesPlugin,
            ));

        #[cfg(feature = "dev-tools")]
        app.add_systems(
            Update,
            (
                dev::read_keyboard_intent.before(ControlLogicSet::Detect),
                dev::dump_character_state.after(ControlLogicSet::Fsm),
            )
                .run_if(resource_exists::<ButtonInput<KeyCode>>),
        );
    }
}
