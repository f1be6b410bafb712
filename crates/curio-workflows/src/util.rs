//! Shared workflow helpers.

use curio_api::{ApiError, ApiSession};
use curio_store::{Action, ErrorHandlerId};

/// The clear/report convention for one caller-assigned error surface.
///
/// The clearing action is always emitted first in an attempt, so a recorded
/// failure can never be misattributed to a later attempt.
pub(crate) struct ErrorHandler {
  id: ErrorHandlerId,
}

impl ErrorHandler {
  pub(crate) fn new(id: ErrorHandlerId) -> Self {
    Self { id }
  }

  /// Action clearing any error recorded for this handler.
  pub(crate) fn clear(&self) -> Action {
    Action::ClearError {
      id: self.id.clone(),
    }
  }

  /// Action recording a failure for this handler.
  pub(crate) fn error(&self, error: &ApiError) -> Action {
    Action::SetError {
      id: self.id.clone(),
      error: error.clone(),
    }
  }
}

/// `/{lang}/{clientApp}` - the application root for the active locale.
pub(crate) fn app_root_url(session: &ApiSession) -> String {
  format!("/{}/{}", session.lang, session.client_app)
}

/// A collection's canonical path.
pub(crate) fn collection_url(session: &ApiSession, username: &str, slug: &str) -> String {
  format!(
    "{}/collections/{}/{}/",
    app_root_url(session),
    username,
    slug
  )
}

/// A collection's edit path.
pub(crate) fn collection_edit_url(session: &ApiSession, username: &str, slug: &str) -> String {
  format!("{}edit/", collection_url(session, username, slug))
}
