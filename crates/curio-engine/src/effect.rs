//! Per-invocation effect context.

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use curio_api::{Api, ApiError};
use curio_store::{Action, AppState};

use crate::dispatch::Dispatcher;
use crate::error::EffectError;

/// The effect vocabulary handed to a workflow invocation.
///
/// Every primitive checks the invocation's cancellation token before its
/// result is applied; once the token fires, effects fail with
/// [`EffectError::Cancelled`] and nothing further from this invocation
/// reaches the store.
pub struct Effects {
  api: Arc<dyn Api>,
  dispatcher: Dispatcher,
  cancel: CancellationToken,
}

impl Effects {
  pub(crate) fn new(api: Arc<dyn Api>, dispatcher: Dispatcher, cancel: CancellationToken) -> Self {
    Self {
      api,
      dispatcher,
      cancel,
    }
  }

  /// The API to run operations against. Pass the returned operation future
  /// to [`Effects::invoke`].
  pub fn api(&self) -> &Arc<dyn Api> {
    &self.api
  }

  /// Await an API operation.
  ///
  /// The outer `Result` is scheduler-level - `Err` means the invocation was
  /// cancelled while the operation was in flight and its result has been
  /// discarded; propagate it with `?`. The inner `Result` is the operation's
  /// own outcome, which the procedure handles locally.
  pub async fn invoke<T>(
    &self,
    operation: impl Future<Output = Result<T, ApiError>>,
  ) -> Result<Result<T, ApiError>, EffectError> {
    tokio::select! {
      biased;
      _ = self.cancel.cancelled() => Err(EffectError::Cancelled),
      result = operation => Ok(result),
    }
  }

  /// Read a projection of current state.
  ///
  /// Fields that must be mutually consistent should be read in a single
  /// `select` call - other invocations may mutate the store between effect
  /// boundaries, never during one.
  pub async fn select<T, F>(&self, selector: F) -> Result<T, EffectError>
  where
    T: Send + 'static,
    F: FnOnce(&AppState) -> T + Send + 'static,
  {
    tokio::select! {
      biased;
      _ = self.cancel.cancelled() => Err(EffectError::Cancelled),
      result = self.dispatcher.select(selector) => result,
    }
  }

  /// Emit an action toward the store (and any workflow registered for its
  /// kind). Returns as soon as the action is enqueued; actions put by one
  /// invocation apply in the exact order they were put.
  pub fn put(&self, action: Action) -> Result<(), EffectError> {
    if self.cancel.is_cancelled() {
      return Err(EffectError::Cancelled);
    }
    self.dispatcher.dispatch(action)
  }
}
