//! Generic state machine engine shared by the movement and turn domains.

mod machine;
#[cfg(test)]
mod tests;

pub use machine::{DisposeError, StateMachine, StateNode, StateTag, Transition, Transitions};
