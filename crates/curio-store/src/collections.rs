//! Collections slice reducer.

use crate::action::Action;
use crate::state::{CollectionsState, CurrentCollection};

pub(crate) fn reduce(state: &mut CollectionsState, action: &Action) {
  match action {
    Action::FetchCurrentCollection(_) | Action::FetchCurrentCollectionPage(_) => {
      state.current_loading = true;
    }
    Action::FetchUserCollections(payload) => {
      state.loading_for.insert(payload.username.clone());
    }
    Action::LoadCurrentCollection { detail, addons } => {
      state.by_slug.insert(detail.slug.clone(), detail.clone());
      state.current = Some(CurrentCollection {
        detail: detail.clone(),
        addons: addons.clone(),
      });
      state.current_loading = false;
    }
    Action::LoadCurrentCollectionPage { addons } => {
      if let Some(current) = state.current.as_mut() {
        current.addons = addons.clone();
      }
      state.current_loading = false;
    }
    Action::LoadUserCollections {
      username,
      collections,
    } => {
      state.loading_for.remove(username);
      for collection in collections {
        state
          .by_slug
          .insert(collection.slug.clone(), collection.clone());
      }
      state.by_username.insert(username.clone(), collections.clone());
    }
    Action::AddonAddedToCollection {
      addon_id,
      collection_id,
      username,
    } => {
      state
        .addon_in_collections
        .entry((username.clone(), *addon_id))
        .or_default()
        .push(*collection_id);
    }
    Action::AbortFetchCurrentCollection => {
      state.current = None;
      state.current_loading = false;
    }
    Action::AbortFetchUserCollections { username } => {
      state.loading_for.remove(username);
    }
    Action::AbortAddAddonToCollection { addon_id, username } => {
      state
        .addon_in_collections
        .remove(&(username.clone(), *addon_id));
    }
    Action::UnloadCollectionBySlug { slug } => {
      state.by_slug.remove(slug);
      if state
        .current
        .as_ref()
        .is_some_and(|current| current.detail.slug == *slug)
      {
        state.current = None;
      }
    }
    Action::BeginCollectionModification => {
      state.is_modifying = true;
    }
    Action::FinishCollectionModification => {
      state.is_modifying = false;
    }
    _ => {}
  }
}
