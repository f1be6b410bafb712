//! Curio API boundary
//!
//! This crate defines the interface to the remote resource API: the
//! [`ApiSession`] request context, the domain types returned by operations,
//! and the [`CollectionsApi`]/[`UsersApi`] operation traits (combined as
//! [`Api`]). Transport and wire serialization live behind the traits -
//! workflows only ever see these signatures.

mod collections;
mod session;
mod types;
mod users;

pub use collections::{CollectionsApi, CreateCollectionParams, UpdateCollectionParams};
pub use session::ApiSession;
pub use types::{
  CollectionAddon, CollectionAddonsPage, CollectionDetail, LocalizedString, Notification,
  UserAccount,
};
pub use users::{NotificationUpdates, UserEditableFields, UsersApi};

use serde::{Deserialize, Serialize};

/// Failure of a single API operation.
///
/// Opaque to callers: workflows convert these into error events without
/// inspecting them beyond display.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ApiError {
  /// The request never produced a usable response (network, timeout).
  #[error("request failed: {message}")]
  Request { message: String },

  /// The server answered and rejected the operation.
  #[error("rejected with status {status}: {message}")]
  Rejected { status: u16, message: String },
}

/// The full resource API surface.
///
/// Blanket-implemented for anything providing both operation groups, so a
/// single client (or test fake) can be passed around as `Arc<dyn Api>`.
pub trait Api: CollectionsApi + UsersApi {}

impl<T: CollectionsApi + UsersApi> Api for T {}
