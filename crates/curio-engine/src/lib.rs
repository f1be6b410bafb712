//! Curio Engine
//!
//! The effect-orchestration core. A [`Runtime`] owns the application state
//! and a registration table mapping trigger kinds to workflow procedures;
//! once spawned, its dispatch loop applies every action to the state in
//! order and starts the registered procedure for trigger kinds under a
//! latest-wins policy - a new trigger for a kind cancels the previous
//! in-flight invocation.
//!
//! Procedures run as tasks and interact with the world only through their
//! [`Effects`] context: `invoke` awaits an API operation, `select` reads a
//! consistent projection of current state, `put` emits an action. Every
//! primitive checks the invocation's cancellation token, so a superseded
//! procedure stops at its next effect boundary and nothing it does after
//! that point reaches the store.

mod dispatch;
mod effect;
mod error;
mod runtime;

pub use dispatch::Dispatcher;
pub use effect::Effects;
pub use error::{EffectError, WorkflowError};
pub use runtime::{Runtime, RuntimeHandle, WorkflowFuture, WorkflowHandler};
