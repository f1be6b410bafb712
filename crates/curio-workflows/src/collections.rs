//! Collection workflows.

use tracing::warn;

use curio_api::{CreateCollectionParams, UpdateCollectionParams};
use curio_engine::{Effects, Runtime, WorkflowError, WorkflowFuture};
use curio_store::{
  Action, ActionKind, AddAddonToCollection, CreateCollection, DeleteCollection,
  FetchCurrentCollection, FetchCurrentCollectionPage, FetchUserCollections,
  RemoveAddonFromCollection, UpdateCollection,
};

use crate::util::{app_root_url, collection_edit_url, collection_url, ErrorHandler};

/// Addon page loaded when a trigger does not name one.
const DEFAULT_PAGE: u32 = 1;

pub(crate) fn register(runtime: &mut Runtime) {
  runtime.take_latest(
    ActionKind::FetchCurrentCollection,
    |fx: Effects, action: Action| -> WorkflowFuture {
      Box::pin(async move {
        match action {
          Action::FetchCurrentCollection(payload) => fetch_current_collection(&fx, payload).await,
          _ => Ok(()),
        }
      })
    },
  );
  runtime.take_latest(
    ActionKind::FetchCurrentCollectionPage,
    |fx: Effects, action: Action| -> WorkflowFuture {
      Box::pin(async move {
        match action {
          Action::FetchCurrentCollectionPage(payload) => {
            fetch_current_collection_page(&fx, payload).await
          }
          _ => Ok(()),
        }
      })
    },
  );
  runtime.take_latest(
    ActionKind::FetchUserCollections,
    |fx: Effects, action: Action| -> WorkflowFuture {
      Box::pin(async move {
        match action {
          Action::FetchUserCollections(payload) => fetch_user_collections(&fx, payload).await,
          _ => Ok(()),
        }
      })
    },
  );
  runtime.take_latest(
    ActionKind::AddAddonToCollection,
    |fx: Effects, action: Action| -> WorkflowFuture {
      Box::pin(async move {
        match action {
          Action::AddAddonToCollection(payload) => add_addon_to_collection(&fx, payload).await,
          _ => Ok(()),
        }
      })
    },
  );
  runtime.take_latest(
    ActionKind::RemoveAddonFromCollection,
    |fx: Effects, action: Action| -> WorkflowFuture {
      Box::pin(async move {
        match action {
          Action::RemoveAddonFromCollection(payload) => {
            remove_addon_from_collection(&fx, payload).await
          }
          _ => Ok(()),
        }
      })
    },
  );
  runtime.take_latest(
    ActionKind::CreateCollection,
    |fx: Effects, action: Action| -> WorkflowFuture {
      Box::pin(async move {
        match action {
          Action::CreateCollection(payload) => {
            modify_collection(&fx, CollectionChange::Create(payload)).await
          }
          _ => Ok(()),
        }
      })
    },
  );
  runtime.take_latest(
    ActionKind::UpdateCollection,
    |fx: Effects, action: Action| -> WorkflowFuture {
      Box::pin(async move {
        match action {
          Action::UpdateCollection(payload) => {
            modify_collection(&fx, CollectionChange::Update(payload)).await
          }
          _ => Ok(()),
        }
      })
    },
  );
  runtime.take_latest(
    ActionKind::DeleteCollection,
    |fx: Effects, action: Action| -> WorkflowFuture {
      Box::pin(async move {
        match action {
          Action::DeleteCollection(payload) => delete_collection(&fx, payload).await,
          _ => Ok(()),
        }
      })
    },
  );
}

/// Fetch the viewed collection: detail and one addon page, together.
async fn fetch_current_collection(
  fx: &Effects,
  payload: FetchCurrentCollection,
) -> Result<(), WorkflowError> {
  let handler = ErrorHandler::new(payload.error_handler_id.clone());
  fx.put(handler.clear())?;

  let session = fx.select(|state| state.api.clone()).await?;
  let page = payload.page.unwrap_or(DEFAULT_PAGE);
  let api = fx.api();

  let fetched = fx
    .invoke(async {
      tokio::try_join!(
        api.get_collection_detail(&session, &payload.username, &payload.slug),
        api.get_collection_addons(&session, &payload.username, &payload.slug, page),
      )
    })
    .await?;

  match fetched {
    Ok((detail, addons_page)) => {
      fx.put(Action::LoadCurrentCollection {
        detail,
        addons: addons_page.addons,
      })?;
    }
    Err(error) => {
      warn!(error = %error, "collection failed to load");
      fx.put(handler.error(&error))?;
      fx.put(Action::AbortFetchCurrentCollection)?;
    }
  }
  Ok(())
}

/// Fetch one addon page of the already-loaded collection. A page-level
/// failure aborts the whole current-collection view.
async fn fetch_current_collection_page(
  fx: &Effects,
  payload: FetchCurrentCollectionPage,
) -> Result<(), WorkflowError> {
  let handler = ErrorHandler::new(payload.error_handler_id.clone());
  fx.put(handler.clear())?;

  let session = fx.select(|state| state.api.clone()).await?;

  let fetched = fx
    .invoke(fx.api().get_collection_addons(
      &session,
      &payload.username,
      &payload.slug,
      payload.page,
    ))
    .await?;

  match fetched {
    Ok(addons_page) => {
      fx.put(Action::LoadCurrentCollectionPage {
        addons: addons_page.addons,
      })?;
    }
    Err(error) => {
      warn!(error = %error, "collection page failed to load");
      fx.put(handler.error(&error))?;
      fx.put(Action::AbortFetchCurrentCollection)?;
    }
  }
  Ok(())
}

async fn fetch_user_collections(
  fx: &Effects,
  payload: FetchUserCollections,
) -> Result<(), WorkflowError> {
  let handler = ErrorHandler::new(payload.error_handler_id.clone());
  fx.put(handler.clear())?;

  let session = fx.select(|state| state.api.clone()).await?;

  let fetched = fx
    .invoke(fx.api().get_all_user_collections(&session, &payload.username))
    .await?;

  match fetched {
    Ok(collections) => {
      fx.put(Action::LoadUserCollections {
        username: payload.username.clone(),
        collections,
      })?;
    }
    Err(error) => {
      warn!(error = %error, username = %payload.username, "user collections failed to load");
      fx.put(handler.error(&error))?;
      fx.put(Action::AbortFetchUserCollections {
        username: payload.username.clone(),
      })?;
    }
  }
  Ok(())
}

async fn add_addon_to_collection(
  fx: &Effects,
  payload: AddAddonToCollection,
) -> Result<(), WorkflowError> {
  let handler = ErrorHandler::new(payload.error_handler_id.clone());
  fx.put(handler.clear())?;

  let session = fx.select(|state| state.api.clone()).await?;

  let added = fx
    .invoke(fx.api().create_collection_addon(
      &session,
      &payload.username,
      &payload.slug,
      payload.addon_id,
      payload.notes.as_deref(),
    ))
    .await?;

  match added {
    Ok(()) => {
      // Refetch the visible page only when the collection is open in edit
      // mode; otherwise nothing on screen shows the new entry.
      if payload.editing {
        fx.put(Action::FetchCurrentCollectionPage(
          FetchCurrentCollectionPage {
            error_handler_id: payload.error_handler_id.clone(),
            username: payload.username.clone(),
            slug: payload.slug.clone(),
            page: payload.page.unwrap_or(DEFAULT_PAGE),
          },
        ))?;
      }
      fx.put(Action::AddonAddedToCollection {
        addon_id: payload.addon_id,
        collection_id: payload.collection_id,
        username: payload.username.clone(),
      })?;
    }
    Err(error) => {
      warn!(error = %error, addon_id = payload.addon_id, "could not add add-on to collection");
      fx.put(handler.error(&error))?;
      fx.put(Action::AbortAddAddonToCollection {
        addon_id: payload.addon_id,
        username: payload.username.clone(),
      })?;
    }
  }
  Ok(())
}

async fn remove_addon_from_collection(
  fx: &Effects,
  payload: RemoveAddonFromCollection,
) -> Result<(), WorkflowError> {
  let handler = ErrorHandler::new(payload.error_handler_id.clone());
  fx.put(handler.clear())?;

  let session = fx.select(|state| state.api.clone()).await?;

  let removed = fx
    .invoke(fx.api().remove_collection_addon(
      &session,
      &payload.username,
      &payload.slug,
      payload.addon_id,
    ))
    .await?;

  match removed {
    Ok(()) => {
      // The removed entry disappears from whatever view triggered this, so
      // the page is always refetched.
      fx.put(Action::FetchCurrentCollectionPage(
        FetchCurrentCollectionPage {
          error_handler_id: payload.error_handler_id.clone(),
          username: payload.username.clone(),
          slug: payload.slug.clone(),
          page: payload.page,
        },
      ))?;
    }
    Err(error) => {
      warn!(error = %error, addon_id = payload.addon_id, "could not remove add-on from collection");
      fx.put(handler.error(&error))?;
    }
  }
  Ok(())
}

/// A create or update request; the two share the modification bracket.
enum CollectionChange {
  Create(CreateCollection),
  Update(UpdateCollection),
}

async fn modify_collection(fx: &Effects, change: CollectionChange) -> Result<(), WorkflowError> {
  let handler = ErrorHandler::new(match &change {
    CollectionChange::Create(payload) => payload.error_handler_id.clone(),
    CollectionChange::Update(payload) => payload.error_handler_id.clone(),
  });
  fx.put(handler.clear())?;
  fx.put(Action::BeginCollectionModification)?;

  let outcome = apply_collection_change(fx, &handler, change).await;

  // Cleanup: emitted on success and on a caught failure. A superseded
  // invocation is stopped before reaching this point and emits nothing.
  fx.put(Action::FinishCollectionModification)?;
  outcome
}

async fn apply_collection_change(
  fx: &Effects,
  handler: &ErrorHandler,
  change: CollectionChange,
) -> Result<(), WorkflowError> {
  let session = fx.select(|state| state.api.clone()).await?;

  match change {
    CollectionChange::Create(payload) => {
      let params = CreateCollectionParams {
        slug: payload.slug.clone(),
        name: payload.name,
        description: payload.description,
        default_locale: payload.default_locale,
      };

      let created = fx
        .invoke(
          fx.api()
            .create_collection(&session, &payload.username, &params),
        )
        .await?;

      match created {
        Ok(detail) => {
          // The new collection has no add-ons yet; load it localized to the
          // language the caller authored it in.
          let detail = detail.localized(&session.lang);
          fx.put(Action::LoadCurrentCollection {
            detail,
            addons: Vec::new(),
          })?;
          fx.put(Action::Navigate {
            path: collection_edit_url(&session, &payload.username, &payload.slug),
          })?;
        }
        Err(error) => {
          warn!(error = %error, "could not create collection");
          fx.put(handler.error(&error))?;
        }
      }
    }
    CollectionChange::Update(payload) => {
      let changes = UpdateCollectionParams {
        slug: payload.slug.clone(),
        name: payload.name,
        description: payload.description,
        default_locale: payload.default_locale,
      };

      let updated = fx
        .invoke(fx.api().update_collection(
          &session,
          &payload.username,
          &payload.collection_slug,
          &changes,
        ))
        .await?;

      match updated {
        Ok(()) => {
          if payload.slug.is_none() {
            // The record cached under the unchanged slug is stale now.
            fx.put(Action::UnloadCollectionBySlug {
              slug: payload.collection_slug.clone(),
            })?;
          }
          let slug = payload.slug.as_deref().unwrap_or(&payload.collection_slug);
          fx.put(Action::Navigate {
            path: collection_url(&session, &payload.username, slug),
          })?;
        }
        Err(error) => {
          warn!(error = %error, "could not update collection");
          fx.put(handler.error(&error))?;
        }
      }
    }
  }
  Ok(())
}

async fn delete_collection(fx: &Effects, payload: DeleteCollection) -> Result<(), WorkflowError> {
  let handler = ErrorHandler::new(payload.error_handler_id.clone());
  fx.put(handler.clear())?;

  let session = fx.select(|state| state.api.clone()).await?;

  let deleted = fx
    .invoke(
      fx.api()
        .delete_collection(&session, &payload.username, &payload.slug),
    )
    .await?;

  match deleted {
    Ok(()) => {
      // Evict before the list refetch lands so the deleted entry cannot be
      // re-served from cache in between.
      fx.put(Action::UnloadCollectionBySlug {
        slug: payload.slug.clone(),
      })?;
      fx.put(Action::FetchUserCollections(FetchUserCollections {
        error_handler_id: payload.error_handler_id.clone(),
        username: payload.username.clone(),
      }))?;
      fx.put(Action::Navigate {
        path: app_root_url(&session),
      })?;
    }
    Err(error) => {
      warn!(error = %error, "could not delete collection");
      fx.put(handler.error(&error))?;
    }
  }
  Ok(())
}
