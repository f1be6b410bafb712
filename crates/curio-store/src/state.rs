//! Application state owned by the runtime task.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use curio_api::{ApiError, ApiSession, CollectionAddon, CollectionDetail, Notification, UserAccount};

use crate::action::ErrorHandlerId;

/// The whole shared state. Cloned for snapshot reads; mutated only by the
/// runtime task applying actions in dispatch order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppState {
  pub api: ApiSession,
  pub collections: CollectionsState,
  pub users: UsersState,
  pub errors: ErrorsState,
  pub router: RouterState,
}

impl AppState {
  pub fn new(session: ApiSession) -> Self {
    Self {
      api: session,
      ..Self::default()
    }
  }
}

/// The collection currently being viewed: its detail record plus the loaded
/// addon page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentCollection {
  pub detail: CollectionDetail,
  pub addons: Vec<CollectionAddon>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionsState {
  pub current: Option<CurrentCollection>,
  pub current_loading: bool,
  /// Detail records cached by slug. Evicted by unload events.
  pub by_slug: HashMap<String, CollectionDetail>,
  /// Collection lists per username.
  pub by_username: HashMap<String, Vec<CollectionDetail>>,
  /// Usernames with a list fetch in flight.
  pub loading_for: HashSet<String>,
  /// (username, addon id) -> collections the add-on was added to this
  /// session. Reset precisely by the scoped abort event.
  pub addon_in_collections: HashMap<(String, u64), Vec<u64>>,
  /// A create/update is in flight.
  pub is_modifying: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsersState {
  pub by_id: HashMap<u64, UserAccount>,
  pub by_username: HashMap<String, u64>,
  pub current_user_id: Option<u64>,
  pub notifications: HashMap<String, Vec<Notification>>,
  /// An account edit is in flight.
  pub is_editing: bool,
}

/// Per-handler error records driving UI error surfaces.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorsState {
  pub records: HashMap<ErrorHandlerId, ApiError>,
}

/// Navigation requested by workflows. Consumed by the routing layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouterState {
  pub location: Option<String>,
}
