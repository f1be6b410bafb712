//! User account operations.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::session::ApiSession;
use crate::types::{Notification, UserAccount};
use crate::ApiError;

/// Profile fields a user can edit. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEditableFields {
  pub display_name: Option<String>,
  pub biography: Option<String>,
  pub homepage: Option<String>,
  pub location: Option<String>,
  pub occupation: Option<String>,
}

/// Notification preference changes, keyed by notification name.
pub type NotificationUpdates = BTreeMap<String, bool>;

/// Operations on user accounts and their notification preferences.
#[async_trait]
pub trait UsersApi: Send + Sync {
  /// Fetch a user account by username.
  async fn get_user_account(
    &self,
    session: &ApiSession,
    username: &str,
  ) -> Result<UserAccount, ApiError>;

  /// Edit a user account, returning the updated record.
  async fn edit_user_account(
    &self,
    session: &ApiSession,
    user_id: u64,
    picture: Option<&[u8]>,
    fields: &UserEditableFields,
  ) -> Result<UserAccount, ApiError>;

  /// Fetch a user's notification preferences.
  async fn get_user_notifications(
    &self,
    session: &ApiSession,
    username: &str,
  ) -> Result<Vec<Notification>, ApiError>;

  /// Apply notification preference changes, returning the full updated set.
  async fn update_user_notifications(
    &self,
    session: &ApiSession,
    user_id: u64,
    notifications: &NotificationUpdates,
  ) -> Result<Vec<Notification>, ApiError>;

  /// Delete a user's profile picture, returning the updated record.
  async fn delete_user_picture(
    &self,
    session: &ApiSession,
    user_id: u64,
  ) -> Result<UserAccount, ApiError>;

  /// Delete a user account.
  async fn delete_user_account(&self, session: &ApiSession, user_id: u64) -> Result<(), ApiError>;

  /// Fetch the account belonging to the session's auth token.
  async fn get_current_user_account(&self, session: &ApiSession) -> Result<UserAccount, ApiError>;
}
