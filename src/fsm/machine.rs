//! Generic reactive finite-state-machine engine.
//!
//! `StateMachine<T, C>` holds a closed set of named states keyed by tag
//! type `T`; each state owns enter/update/fixed-update/exit callbacks over
//! a caller-provided context `C`. Transition logic stays with the caller:
//! update callbacks request transitions through a [`Transitions`] queue,
//! and the machine applies them only after the callback returns, so no
//! transition can start inside another's enter/exit sequence.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use bevy::prelude::*;

/// Closed tag sets usable as state keys.
pub trait StateTag: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {}
impl<T: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static> StateTag for T {}

type EdgeCallback<C> = Box<dyn FnMut(&mut C) + Send + Sync>;
type TickCallback<T, C> = Box<dyn FnMut(&mut C, f32, &mut Transitions<T>) + Send + Sync>;
type DisposeCallback<C> = Box<dyn FnOnce(&mut C) -> Result<(), String> + Send + Sync>;

/// Transition requests collected from a state's tick callback.
#[derive(Debug)]
pub struct Transitions<T> {
    requests: Vec<T>,
}

impl<T: StateTag> Transitions<T> {
    fn new() -> Self {
        Self {
            requests: Vec::new(),
        }
    }

    /// Request a transition to `tag` once the current callback returns.
    pub fn request(&mut self, tag: T) {
        self.requests.push(tag);
    }
}

/// A recorded `(old, new)` transition. `from` is `None` only for the
/// synthetic entry fired when the first state is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<T> {
    pub from: Option<T>,
    pub to: T,
}

/// One named state and its owned callbacks. Built with the fluent methods
/// and registered via [`StateMachine::add_state`].
pub struct StateNode<T: StateTag, C> {
    tag: T,
    on_enter: Option<EdgeCallback<C>>,
    on_exit: Option<EdgeCallback<C>>,
    on_update: Option<TickCallback<T, C>>,
    on_physics: Option<TickCallback<T, C>>,
    on_dispose: Option<DisposeCallback<C>>,
}

impl<T: StateTag, C> StateNode<T, C> {
    pub fn new(tag: T) -> Self {
        Self {
            tag,
            on_enter: None,
            on_exit: None,
            on_update: None,
            on_physics: None,
            on_dispose: None,
        }
    }

    pub fn tag(&self) -> T {
        self.tag
    }

    pub fn enter(mut self, f: impl FnMut(&mut C) + Send + Sync + 'static) -> Self {
        self.on_enter = Some(Box::new(f));
        self
    }

    pub fn exit(mut self, f: impl FnMut(&mut C) + Send + Sync + 'static) -> Self {
        self.on_exit = Some(Box::new(f));
        self
    }

    /// Logic-tick callback; may request transitions.
    pub fn update(
        mut self,
        f: impl FnMut(&mut C, f32, &mut Transitions<T>) + Send + Sync + 'static,
    ) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    /// Physics-tick callback; may request transitions.
    pub fn physics(
        mut self,
        f: impl FnMut(&mut C, f32, &mut Transitions<T>) + Send + Sync + 'static,
    ) -> Self {
        self.on_physics = Some(Box::new(f));
        self
    }

    /// Teardown callback, run once during machine disposal.
    pub fn dispose(
        mut self,
        f: impl FnOnce(&mut C) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.on_dispose = Some(Box::new(f));
        self
    }
}

/// Aggregated disposal failures; disposal never short-circuits, so every
/// state gets torn down and all failures are reported together.
#[derive(Debug)]
pub struct DisposeError<T> {
    pub failures: Vec<(T, String)>,
}

impl<T: fmt::Debug> fmt::Display for DisposeError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} state(s) failed to dispose:", self.failures.len())?;
        for (tag, message) in &self.failures {
            write!(f, " [{tag:?}: {message}]")?;
        }
        Ok(())
    }
}

/// The machine proper. At most one state is current at any time; a state
/// object, once added, persists until `remove_state` or disposal.
pub struct StateMachine<T: StateTag, C> {
    states: HashMap<T, StateNode<T, C>>,
    order: Vec<T>,
    current: Option<T>,
    in_transition: bool,
    recorded: Vec<Transition<T>>,
}

impl<T: StateTag, C> Default for StateMachine<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StateTag, C> StateMachine<T, C> {
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
            order: Vec::new(),
            current: None,
            in_transition: false,
            recorded: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<T> {
        self.current
    }

    pub fn contains(&self, tag: T) -> bool {
        self.states.contains_key(&tag)
    }

    /// Register a state. The first state added becomes current immediately,
    /// firing a synthetic entry transition. Re-adding an existing tag is
    /// rejected; state objects persist for the machine's lifetime.
    pub fn add_state(&mut self, node: StateNode<T, C>, ctx: &mut C) {
        let tag = node.tag;
        if self.states.contains_key(&tag) {
            warn!("state {tag:?} already registered; ignoring duplicate");
            return;
        }
        self.states.insert(tag, node);
        self.order.push(tag);

        if self.current.is_none() {
            self.in_transition = true;
            if let Some(node) = self.states.get_mut(&tag)
                && let Some(enter) = node.on_enter.as_mut()
            {
                enter(ctx);
            }
            self.current = Some(tag);
            self.recorded.push(Transition { from: None, to: tag });
            self.in_transition = false;
        }
    }

    /// Validated transition. Unknown targets, self-transitions, and calls
    /// made while another transition is in progress are non-fatal: they log
    /// and no-op. Returns whether the transition ran.
    pub fn change_state(&mut self, tag: T, ctx: &mut C) -> bool {
        if self.in_transition {
            warn!("transition to {tag:?} requested mid-transition; ignored");
            return false;
        }
        if !self.states.contains_key(&tag) {
            warn!("transition to unregistered state {tag:?}; ignored");
            return false;
        }
        if self.current == Some(tag) {
            debug!("transition to current state {tag:?}; ignored");
            return false;
        }
        self.perform_transition(tag, ctx);
        true
    }

    /// Unvalidated transition, for callers that have already established
    /// legality through external predicates. Still refuses unknown tags
    /// (there is nothing to enter) but permits re-entering the current
    /// state, running its exit and enter callbacks again.
    pub fn force_change_state(&mut self, tag: T, ctx: &mut C) -> bool {
        if self.in_transition {
            warn!("forced transition to {tag:?} requested mid-transition; ignored");
            return false;
        }
        if !self.states.contains_key(&tag) {
            warn!("forced transition to unregistered state {tag:?}; ignored");
            return false;
        }
        self.perform_transition(tag, ctx);
        true
    }

    /// Unregister a state. The current state cannot be removed.
    pub fn remove_state(&mut self, tag: T) {
        if self.in_transition {
            warn!("remove_state({tag:?}) during transition; ignored");
            return;
        }
        if self.current == Some(tag) {
            warn!("remove_state({tag:?}) targets the current state; ignored");
            return;
        }
        if self.states.remove(&tag).is_some() {
            self.order.retain(|t| *t != tag);
        }
    }

    /// Fixed ordering: exit(old), swap, enter(new), record `(old, new)`.
    /// `in_transition` guards the whole sequence so a callback can never
    /// start a nested transition.
    fn perform_transition(&mut self, tag: T, ctx: &mut C) {
        self.in_transition = true;
        let from = self.current;

        if let Some(old) = from
            && let Some(node) = self.states.get_mut(&old)
            && let Some(exit) = node.on_exit.as_mut()
        {
            exit(ctx);
        }

        self.current = Some(tag);

        if let Some(node) = self.states.get_mut(&tag)
            && let Some(enter) = node.on_enter.as_mut()
        {
            enter(ctx);
        }

        self.recorded.push(Transition { from, to: tag });
        self.in_transition = false;
    }

    /// Run the current state's logic-tick callback, then apply its
    /// transition requests: the first valid one wins, the rest are logged
    /// and dropped.
    pub fn tick(&mut self, dt: f32, ctx: &mut C) {
        let Some(current) = self.current else {
            return;
        };
        let mut transitions = Transitions::new();
        if let Some(node) = self.states.get_mut(&current)
            && let Some(update) = node.on_update.as_mut()
        {
            update(ctx, dt, &mut transitions);
        }
        self.apply_requests(transitions, ctx);
    }

    /// Run the current state's physics-tick callback, same request rules
    /// as [`StateMachine::tick`].
    pub fn physics_tick(&mut self, dt: f32, ctx: &mut C) {
        let Some(current) = self.current else {
            return;
        };
        let mut transitions = Transitions::new();
        if let Some(node) = self.states.get_mut(&current)
            && let Some(physics) = node.on_physics.as_mut()
        {
            physics(ctx, dt, &mut transitions);
        }
        self.apply_requests(transitions, ctx);
    }

    fn apply_requests(&mut self, transitions: Transitions<T>, ctx: &mut C) {
        let mut applied = false;
        for tag in transitions.requests {
            if applied {
                debug!("extra transition request to {tag:?} dropped; one per tick");
                continue;
            }
            applied = self.change_state(tag, ctx);
        }
    }

    /// Drain transitions recorded since the last drain, oldest first. The
    /// driving system forwards these to its event streams.
    pub fn drain_transitions(&mut self) -> Vec<Transition<T>> {
        std::mem::take(&mut self.recorded)
    }

    /// Tear the machine down: exit the current state, then run every
    /// registered state's dispose callback in registration order,
    /// aggregating failures rather than short-circuiting.
    pub fn dispose(&mut self, ctx: &mut C) -> Result<(), DisposeError<T>> {
        if let Some(current) = self.current.take()
            && let Some(node) = self.states.get_mut(&current)
            && let Some(exit) = node.on_exit.as_mut()
        {
            exit(ctx);
        }

        let mut failures = Vec::new();
        for tag in std::mem::take(&mut self.order) {
            if let Some(mut node) = self.states.remove(&tag)
                && let Some(dispose) = node.on_dispose.take()
                && let Err(message) = dispose(ctx)
            {
                error!("state {tag:?} failed to dispose: {message}");
                failures.push((tag, message));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(DisposeError { failures })
        }
    }
}
