//! Commands into the runtime task and the public dispatch handle.

use tokio::sync::{mpsc, oneshot};

use curio_store::{Action, AppState};

use crate::error::EffectError;

/// One message into the runtime task. Reads travel on the same channel as
/// actions so they serialize with reductions.
pub(crate) enum Command {
  Dispatch(Action),
  Read(Box<dyn FnOnce(&AppState) + Send>),
}

/// Clonable handle for dispatching actions into a running engine and for
/// reading projections of its state.
#[derive(Clone)]
pub struct Dispatcher {
  tx: mpsc::UnboundedSender<Command>,
}

impl Dispatcher {
  pub(crate) fn new(tx: mpsc::UnboundedSender<Command>) -> Self {
    Self { tx }
  }

  /// Enqueue an action. Returns immediately; the action is applied by the
  /// runtime task in dispatch order.
  pub fn dispatch(&self, action: Action) -> Result<(), EffectError> {
    self
      .tx
      .send(Command::Dispatch(action))
      .map_err(|_| EffectError::Closed)
  }

  /// Run a projection against current state.
  ///
  /// The selector executes on the runtime task, so everything it reads in
  /// one call is mutually consistent.
  pub async fn select<T, F>(&self, selector: F) -> Result<T, EffectError>
  where
    T: Send + 'static,
    F: FnOnce(&AppState) -> T + Send + 'static,
  {
    let (reply_tx, reply_rx) = oneshot::channel();
    let read = Box::new(move |state: &AppState| {
      let _ = reply_tx.send(selector(state));
    });
    self
      .tx
      .send(Command::Read(read))
      .map_err(|_| EffectError::Closed)?;
    reply_rx.await.map_err(|_| EffectError::Closed)
  }
}
