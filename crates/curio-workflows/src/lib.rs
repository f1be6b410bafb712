//! Curio Workflows
//!
//! One procedure per use case, written against the engine's effect
//! vocabulary. Every user-triggered procedure follows the same template:
//! clear the caller's error surface, snapshot session state, run the API
//! operation(s), then either emit the domain events for the outcome or
//! convert the failure into an error event (plus a workflow-specific abort
//! event where dependent state needs a precise reset).
//!
//! [`register`] wires all of them onto a [`Runtime`](curio_engine::Runtime)
//! under the latest-wins policy.

mod collections;
mod users;
mod util;

use curio_engine::Runtime;

/// Register every workflow on the runtime.
pub fn register(runtime: &mut Runtime) {
  collections::register(runtime);
  users::register(runtime);
}
