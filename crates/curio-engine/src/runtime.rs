//! The state-owning runtime and its dispatch loop.
//!
//! [`Runtime`] is the wiring surface: construct it with an API client and an
//! initial state, register workflow procedures per trigger kind with
//! [`Runtime::take_latest`], then [`Runtime::spawn`] it. The returned
//! [`RuntimeHandle`] dispatches trigger actions and reads state; the loop
//! task owns the state and the per-kind cancellation slots.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use curio_api::Api;
use curio_store::{reduce, Action, ActionKind, AppState};

use crate::dispatch::{Command, Dispatcher};
use crate::effect::Effects;
use crate::error::{EffectError, WorkflowError};

/// Future returned by a workflow procedure.
pub type WorkflowFuture = BoxFuture<'static, Result<(), WorkflowError>>;

/// A workflow procedure bound to a trigger kind.
///
/// Implemented for closures so registrations read as
/// `runtime.take_latest(kind, |fx, action| Box::pin(async move { .. }))`.
pub trait WorkflowHandler: Send + Sync {
  fn run(&self, effects: Effects, action: Action) -> WorkflowFuture;
}

impl<F> WorkflowHandler for F
where
  F: Fn(Effects, Action) -> WorkflowFuture + Send + Sync,
{
  fn run(&self, effects: Effects, action: Action) -> WorkflowFuture {
    (self)(effects, action)
  }
}

/// The single live invocation for a trigger kind.
struct Invocation {
  cancel: CancellationToken,
  handle: JoinHandle<()>,
}

struct Registration {
  handler: Arc<dyn WorkflowHandler>,
  current: Option<Invocation>,
}

/// The engine before it is spawned: owned state plus the registration table.
pub struct Runtime {
  api: Arc<dyn Api>,
  state: AppState,
  registrations: HashMap<ActionKind, Registration>,
  taps: Vec<mpsc::UnboundedSender<Action>>,
}

impl Runtime {
  pub fn new(api: Arc<dyn Api>, initial_state: AppState) -> Self {
    Self {
      api,
      state: initial_state,
      registrations: HashMap::new(),
      taps: Vec::new(),
    }
  }

  /// Register `handler` as the workflow for `kind` under the latest-wins
  /// policy: dispatching a `kind` action starts an invocation and cancels
  /// any previous one still in flight. Registering a kind twice replaces
  /// the earlier handler.
  pub fn take_latest<H>(&mut self, kind: ActionKind, handler: H)
  where
    H: WorkflowHandler + 'static,
  {
    self.registrations.insert(
      kind,
      Registration {
        handler: Arc::new(handler),
        current: None,
      },
    );
  }

  /// Observe every dispatched action, in application order.
  pub fn tap(&mut self) -> mpsc::UnboundedReceiver<Action> {
    let (tx, rx) = mpsc::unbounded_channel();
    self.taps.push(tx);
    rx
  }

  /// Start the dispatch loop.
  pub fn spawn(self) -> RuntimeHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher::new(tx);
    let root = CancellationToken::new();
    let join = tokio::spawn(self.run(rx, dispatcher.clone(), root.clone()));
    RuntimeHandle {
      dispatcher,
      root,
      join,
    }
  }

  async fn run(
    mut self,
    mut rx: mpsc::UnboundedReceiver<Command>,
    dispatcher: Dispatcher,
    root: CancellationToken,
  ) {
    loop {
      tokio::select! {
        _ = root.cancelled() => break,
        command = rx.recv() => match command {
          None => break,
          Some(Command::Read(read)) => read(&self.state),
          Some(Command::Dispatch(action)) => self.apply(action, &dispatcher, &root),
        },
      }
    }

    // Stop whatever is still in flight; their effects will be refused.
    for registration in self.registrations.values() {
      if let Some(invocation) = &registration.current {
        invocation.cancel.cancel();
      }
    }
    debug!("runtime stopped");
  }

  fn apply(&mut self, action: Action, dispatcher: &Dispatcher, root: &CancellationToken) {
    reduce(&mut self.state, &action);
    self.taps.retain(|tap| tap.send(action.clone()).is_ok());

    let kind = action.kind();
    let Some(registration) = self.registrations.get_mut(&kind) else {
      return;
    };

    if let Some(previous) = registration.current.take() {
      if !previous.handle.is_finished() {
        debug!(kind = ?kind, "superseding in-flight invocation");
      }
      previous.cancel.cancel();
    }

    let cancel = root.child_token();
    let effects = Effects::new(Arc::clone(&self.api), dispatcher.clone(), cancel.clone());
    let handler = Arc::clone(&registration.handler);
    let invocation_id = uuid::Uuid::new_v4();

    let handle = tokio::spawn(async move {
      debug!(invocation_id = %invocation_id, kind = ?kind, "workflow started");
      match handler.run(effects, action).await {
        Ok(()) => {
          debug!(invocation_id = %invocation_id, kind = ?kind, "workflow completed");
        }
        Err(err) if err.is_cancellation() => {
          debug!(invocation_id = %invocation_id, kind = ?kind, "workflow cancelled");
        }
        Err(err) => {
          // A procedure defect or a deliberately unhandled operation
          // failure. Contain it: only this invocation dies.
          error!(
            invocation_id = %invocation_id,
            kind = ?kind,
            error = %err,
            "workflow failed with no local error path"
          );
        }
      }
    });

    registration.current = Some(Invocation { cancel, handle });
  }
}

/// Handle to a spawned engine.
pub struct RuntimeHandle {
  dispatcher: Dispatcher,
  root: CancellationToken,
  join: JoinHandle<()>,
}

impl RuntimeHandle {
  /// A clonable dispatch handle, e.g. for UI layers.
  pub fn dispatcher(&self) -> Dispatcher {
    self.dispatcher.clone()
  }

  /// Dispatch an action into the engine.
  pub fn dispatch(&self, action: Action) -> Result<(), EffectError> {
    self.dispatcher.dispatch(action)
  }

  /// Read a projection of current state.
  pub async fn select<T, F>(&self, selector: F) -> Result<T, EffectError>
  where
    T: Send + 'static,
    F: FnOnce(&AppState) -> T + Send + 'static,
  {
    self.dispatcher.select(selector).await
  }

  /// Cancel everything and wait for the loop task to stop.
  pub async fn shutdown(self) {
    self.root.cancel();
    let _ = self.join.await;
  }
}
