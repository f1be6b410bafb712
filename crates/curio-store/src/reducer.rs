//! Top-level reducer.

use crate::action::Action;
use crate::state::AppState;
use crate::{collections, users};

/// Apply one action to the state. Pure: no effects, no failures.
pub fn reduce(state: &mut AppState, action: &Action) {
  match action {
    Action::SetSessionToken(payload) => {
      state.api.token = Some(payload.token.clone());
    }
    Action::ClearError { id } => {
      state.errors.records.remove(id);
    }
    Action::SetError { id, error } => {
      state.errors.records.insert(id.clone(), error.clone());
    }
    Action::Navigate { path } => {
      state.router.location = Some(path.clone());
    }
    _ => {}
  }

  collections::reduce(&mut state.collections, action);
  users::reduce(&mut state.users, action);
}
