//! Dispatchable actions.
//!
//! One enum covers both halves of the dispatch space: trigger events that
//! start (or restart) a workflow, and state-mutation events emitted by
//! running workflows. Reducers observe every action; the scheduler only
//! reacts to kinds with a registered workflow.

use std::fmt;

use serde::{Deserialize, Serialize};

use curio_api::{
  ApiError, CollectionAddon, CollectionDetail, LocalizedString, Notification, NotificationUpdates,
  UserAccount, UserEditableFields,
};

/// Caller-assigned id correlating one user-facing action with its error
/// surface. A failure recorded for an id is always preceded by a clearing
/// event for the same id within the same attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorHandlerId(String);

impl ErrorHandlerId {
  pub fn new(id: impl Into<String>) -> Self {
    Self(id.into())
  }
}

impl fmt::Display for ErrorHandlerId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for ErrorHandlerId {
  fn from(id: &str) -> Self {
    Self::new(id)
  }
}

/// Trigger: fetch the collection being viewed (detail plus one addon page).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchCurrentCollection {
  pub error_handler_id: ErrorHandlerId,
  pub username: String,
  pub slug: String,
  /// Addon page to load; defaults to the first page.
  pub page: Option<u32>,
}

/// Trigger: fetch one addon page of the collection being viewed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchCurrentCollectionPage {
  pub error_handler_id: ErrorHandlerId,
  pub username: String,
  pub slug: String,
  pub page: u32,
}

/// Trigger: fetch every collection owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchUserCollections {
  pub error_handler_id: ErrorHandlerId,
  pub username: String,
}

/// Trigger: add an add-on to a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddAddonToCollection {
  pub error_handler_id: ErrorHandlerId,
  pub addon_id: u64,
  pub collection_id: u64,
  pub slug: String,
  pub username: String,
  /// Set when the collection view is open in edit mode; triggers a page
  /// refetch after the add so the visible list picks up the new entry.
  pub editing: bool,
  pub page: Option<u32>,
  pub notes: Option<String>,
}

/// Trigger: remove an add-on from a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveAddonFromCollection {
  pub error_handler_id: ErrorHandlerId,
  pub addon_id: u64,
  pub page: u32,
  pub slug: String,
  pub username: String,
}

/// Trigger: create a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCollection {
  pub error_handler_id: ErrorHandlerId,
  pub username: String,
  pub slug: String,
  pub name: LocalizedString,
  pub description: LocalizedString,
  pub default_locale: Option<String>,
}

/// Trigger: update the collection currently known as `collection_slug`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateCollection {
  pub error_handler_id: ErrorHandlerId,
  pub username: String,
  pub collection_slug: String,
  /// New slug, when the collection is being renamed.
  pub slug: Option<String>,
  pub name: Option<LocalizedString>,
  pub description: Option<LocalizedString>,
  pub default_locale: Option<String>,
}

/// Trigger: delete a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteCollection {
  pub error_handler_id: ErrorHandlerId,
  pub slug: String,
  pub username: String,
}

/// Trigger: fetch a user account by username.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchUserAccount {
  pub error_handler_id: ErrorHandlerId,
  pub username: String,
}

/// Trigger: edit a user account, optionally updating notification
/// preferences in the same attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditUserAccount {
  pub error_handler_id: ErrorHandlerId,
  pub user_id: u64,
  pub picture: Option<Vec<u8>>,
  pub fields: UserEditableFields,
  pub notifications: NotificationUpdates,
}

/// Trigger: delete a user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteUserAccount {
  pub error_handler_id: ErrorHandlerId,
  pub user_id: u64,
}

/// Trigger: delete a user's profile picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteUserPicture {
  pub error_handler_id: ErrorHandlerId,
  pub user_id: u64,
}

/// Trigger: fetch a user's notification preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchUserNotifications {
  pub error_handler_id: ErrorHandlerId,
  pub username: String,
}

/// Trigger: a fresh auth token arrived for the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSessionToken {
  pub token: String,
}

/// Every dispatchable action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
  // Triggers.
  FetchCurrentCollection(FetchCurrentCollection),
  FetchCurrentCollectionPage(FetchCurrentCollectionPage),
  FetchUserCollections(FetchUserCollections),
  AddAddonToCollection(AddAddonToCollection),
  RemoveAddonFromCollection(RemoveAddonFromCollection),
  CreateCollection(CreateCollection),
  UpdateCollection(UpdateCollection),
  DeleteCollection(DeleteCollection),
  FetchUserAccount(FetchUserAccount),
  EditUserAccount(EditUserAccount),
  DeleteUserAccount(DeleteUserAccount),
  DeleteUserPicture(DeleteUserPicture),
  FetchUserNotifications(FetchUserNotifications),
  SetSessionToken(SetSessionToken),

  // Error surface.
  ClearError { id: ErrorHandlerId },
  SetError { id: ErrorHandlerId, error: ApiError },

  // Collection mutations.
  LoadCurrentCollection {
    detail: CollectionDetail,
    addons: Vec<CollectionAddon>,
  },
  LoadCurrentCollectionPage { addons: Vec<CollectionAddon> },
  LoadUserCollections {
    username: String,
    collections: Vec<CollectionDetail>,
  },
  AddonAddedToCollection {
    addon_id: u64,
    collection_id: u64,
    username: String,
  },
  AbortFetchCurrentCollection,
  AbortFetchUserCollections { username: String },
  AbortAddAddonToCollection { addon_id: u64, username: String },
  UnloadCollectionBySlug { slug: String },
  BeginCollectionModification,
  FinishCollectionModification,

  // User mutations.
  LoadUserAccount { user: UserAccount },
  LoadCurrentUserAccount { user: UserAccount },
  LoadUserNotifications {
    username: String,
    notifications: Vec<Notification>,
  },
  UnloadUserAccount { user_id: u64 },
  FinishEditUserAccount,

  // Navigation.
  Navigate { path: String },
}

impl Action {
  /// The discriminant used to key workflow registrations.
  pub fn kind(&self) -> ActionKind {
    match self {
      Self::FetchCurrentCollection(_) => ActionKind::FetchCurrentCollection,
      Self::FetchCurrentCollectionPage(_) => ActionKind::FetchCurrentCollectionPage,
      Self::FetchUserCollections(_) => ActionKind::FetchUserCollections,
      Self::AddAddonToCollection(_) => ActionKind::AddAddonToCollection,
      Self::RemoveAddonFromCollection(_) => ActionKind::RemoveAddonFromCollection,
      Self::CreateCollection(_) => ActionKind::CreateCollection,
      Self::UpdateCollection(_) => ActionKind::UpdateCollection,
      Self::DeleteCollection(_) => ActionKind::DeleteCollection,
      Self::FetchUserAccount(_) => ActionKind::FetchUserAccount,
      Self::EditUserAccount(_) => ActionKind::EditUserAccount,
      Self::DeleteUserAccount(_) => ActionKind::DeleteUserAccount,
      Self::DeleteUserPicture(_) => ActionKind::DeleteUserPicture,
      Self::FetchUserNotifications(_) => ActionKind::FetchUserNotifications,
      Self::SetSessionToken(_) => ActionKind::SetSessionToken,
      Self::ClearError { .. } => ActionKind::ClearError,
      Self::SetError { .. } => ActionKind::SetError,
      Self::LoadCurrentCollection { .. } => ActionKind::LoadCurrentCollection,
      Self::LoadCurrentCollectionPage { .. } => ActionKind::LoadCurrentCollectionPage,
      Self::LoadUserCollections { .. } => ActionKind::LoadUserCollections,
      Self::AddonAddedToCollection { .. } => ActionKind::AddonAddedToCollection,
      Self::AbortFetchCurrentCollection => ActionKind::AbortFetchCurrentCollection,
      Self::AbortFetchUserCollections { .. } => ActionKind::AbortFetchUserCollections,
      Self::AbortAddAddonToCollection { .. } => ActionKind::AbortAddAddonToCollection,
      Self::UnloadCollectionBySlug { .. } => ActionKind::UnloadCollectionBySlug,
      Self::BeginCollectionModification => ActionKind::BeginCollectionModification,
      Self::FinishCollectionModification => ActionKind::FinishCollectionModification,
      Self::LoadUserAccount { .. } => ActionKind::LoadUserAccount,
      Self::LoadCurrentUserAccount { .. } => ActionKind::LoadCurrentUserAccount,
      Self::LoadUserNotifications { .. } => ActionKind::LoadUserNotifications,
      Self::UnloadUserAccount { .. } => ActionKind::UnloadUserAccount,
      Self::FinishEditUserAccount => ActionKind::FinishEditUserAccount,
      Self::Navigate { .. } => ActionKind::Navigate,
    }
  }
}

/// Fieldless discriminant of [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
  FetchCurrentCollection,
  FetchCurrentCollectionPage,
  FetchUserCollections,
  AddAddonToCollection,
  RemoveAddonFromCollection,
  CreateCollection,
  UpdateCollection,
  DeleteCollection,
  FetchUserAccount,
  EditUserAccount,
  DeleteUserAccount,
  DeleteUserPicture,
  FetchUserNotifications,
  SetSessionToken,
  ClearError,
  SetError,
  LoadCurrentCollection,
  LoadCurrentCollectionPage,
  LoadUserCollections,
  AddonAddedToCollection,
  AbortFetchCurrentCollection,
  AbortFetchUserCollections,
  AbortAddAddonToCollection,
  UnloadCollectionBySlug,
  BeginCollectionModification,
  FinishCollectionModification,
  LoadUserAccount,
  LoadCurrentUserAccount,
  LoadUserNotifications,
  UnloadUserAccount,
  FinishEditUserAccount,
  Navigate,
}
