//! Curio Store
//!
//! The shared-state model: every dispatchable [`Action`] (trigger events and
//! state-mutation events in one type), the [`AppState`] the runtime owns, and
//! the pure reducers that apply actions to it.
//!
//! Reducers never perform effects. State is mutated exclusively by the
//! runtime task applying actions in dispatch order - workflow procedures
//! only ever read snapshots and emit further actions.

mod action;
mod collections;
mod reducer;
mod state;
mod users;

pub use action::{
  Action, ActionKind, AddAddonToCollection, CreateCollection, DeleteCollection, DeleteUserAccount,
  DeleteUserPicture, EditUserAccount, ErrorHandlerId, FetchCurrentCollection,
  FetchCurrentCollectionPage, FetchUserAccount, FetchUserCollections, FetchUserNotifications,
  RemoveAddonFromCollection, SetSessionToken, UpdateCollection,
};
pub use reducer::reduce;
pub use state::{AppState, CollectionsState, CurrentCollection, ErrorsState, RouterState, UsersState};
