//! Engine error types.

use curio_api::ApiError;

/// Failure of an effect primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EffectError {
  /// The invocation was superseded by a newer trigger (or the engine is
  /// shutting down); no further effects from it may apply.
  #[error("invocation cancelled")]
  Cancelled,

  /// The runtime task is gone.
  #[error("engine closed")]
  Closed,
}

/// Terminal outcome of a workflow invocation.
///
/// Procedures with a local error path only ever return the `Effect` variant
/// (cancellation propagating out of an effect call). An `Operation` escaping
/// a procedure means it deliberately carries no local error path - the
/// scheduler logs it and terminates only that invocation.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
  #[error(transparent)]
  Effect(#[from] EffectError),

  #[error("operation failed: {0}")]
  Operation(#[from] ApiError),
}

impl WorkflowError {
  /// True when the invocation ended because it was superseded or the engine
  /// shut down, rather than because anything went wrong.
  pub fn is_cancellation(&self) -> bool {
    matches!(self, Self::Effect(_))
  }
}
