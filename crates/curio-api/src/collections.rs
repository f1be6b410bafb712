//! Collection operations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::session::ApiSession;
use crate::types::{CollectionAddonsPage, CollectionDetail, LocalizedString};
use crate::ApiError;

/// Fields for creating a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCollectionParams {
  pub slug: String,
  pub name: LocalizedString,
  pub description: LocalizedString,
  pub default_locale: Option<String>,
}

/// Fields for updating a collection. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCollectionParams {
  /// New slug, when the collection is being renamed.
  pub slug: Option<String>,
  pub name: Option<LocalizedString>,
  pub description: Option<LocalizedString>,
  pub default_locale: Option<String>,
}

/// Operations on collections and their add-on entries.
#[async_trait]
pub trait CollectionsApi: Send + Sync {
  /// Fetch one collection's detail record.
  async fn get_collection_detail(
    &self,
    session: &ApiSession,
    username: &str,
    slug: &str,
  ) -> Result<CollectionDetail, ApiError>;

  /// Fetch one page of a collection's add-on listing.
  async fn get_collection_addons(
    &self,
    session: &ApiSession,
    username: &str,
    slug: &str,
    page: u32,
  ) -> Result<CollectionAddonsPage, ApiError>;

  /// Fetch every collection owned by `username`.
  async fn get_all_user_collections(
    &self,
    session: &ApiSession,
    username: &str,
  ) -> Result<Vec<CollectionDetail>, ApiError>;

  /// Add an add-on to a collection.
  async fn create_collection_addon(
    &self,
    session: &ApiSession,
    username: &str,
    slug: &str,
    addon_id: u64,
    notes: Option<&str>,
  ) -> Result<(), ApiError>;

  /// Remove an add-on from a collection.
  async fn remove_collection_addon(
    &self,
    session: &ApiSession,
    username: &str,
    slug: &str,
    addon_id: u64,
  ) -> Result<(), ApiError>;

  /// Create a collection, returning its detail record.
  async fn create_collection(
    &self,
    session: &ApiSession,
    username: &str,
    params: &CreateCollectionParams,
  ) -> Result<CollectionDetail, ApiError>;

  /// Update the collection currently known as `collection_slug`.
  async fn update_collection(
    &self,
    session: &ApiSession,
    username: &str,
    collection_slug: &str,
    changes: &UpdateCollectionParams,
  ) -> Result<(), ApiError>;

  /// Delete a collection.
  async fn delete_collection(
    &self,
    session: &ApiSession,
    username: &str,
    slug: &str,
  ) -> Result<(), ApiError>;
}
