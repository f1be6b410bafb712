//! Curio
//!
//! A client-side synchronization engine: trigger events dispatched into a
//! single runtime are matched to workflow procedures under a latest-wins
//! policy; procedures run API operations and emit state-mutation actions
//! through one ordered channel into the task that owns application state.
//!
//! The pieces live in their own crates - [`curio_api`] for the resource API
//! boundary, [`curio_store`] for actions/state/reducers, [`curio_engine`]
//! for effect primitives and scheduling, [`curio_workflows`] for the
//! procedures. [`launch`] wires them together:
//!
//! ```ignore
//! let engine = curio::launch(api_client, ApiSession::new("en-US", "firefox"));
//! engine.dispatch(Action::FetchUserCollections(fetch))?;
//! ```

pub use curio_api as api;
pub use curio_engine as engine;
pub use curio_store as store;
pub use curio_workflows as workflows;

use std::sync::Arc;

use curio_api::{Api, ApiSession};
use curio_engine::{Runtime, RuntimeHandle};
use curio_store::AppState;

/// Build a runtime with every workflow registered and start it.
pub fn launch(api: Arc<dyn Api>, session: ApiSession) -> RuntimeHandle {
  let mut runtime = Runtime::new(api, AppState::new(session));
  curio_workflows::register(&mut runtime);
  runtime.spawn()
}
