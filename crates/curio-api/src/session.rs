//! Request context shared by every API operation.

use serde::{Deserialize, Serialize};

/// Session metadata threaded through every API call.
///
/// Mirrors the client's ambient state: the active language, the application
/// variant the client is browsing as, and the auth token once one has been
/// issued.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSession {
  /// Active language code, e.g. `en-US`.
  pub lang: String,
  /// Client application identifier, e.g. `firefox`.
  pub client_app: String,
  /// Auth token, if the session is authenticated.
  pub token: Option<String>,
}

impl ApiSession {
  /// Create an unauthenticated session.
  pub fn new(lang: impl Into<String>, client_app: impl Into<String>) -> Self {
    Self {
      lang: lang.into(),
      client_app: client_app.into(),
      token: None,
    }
  }

  /// The same session with the given auth token.
  pub fn with_token(mut self, token: impl Into<String>) -> Self {
    self.token = Some(token.into());
    self
  }
}
