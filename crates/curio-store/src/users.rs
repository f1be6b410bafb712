//! Users slice reducer.

use curio_api::UserAccount;

use crate::action::Action;
use crate::state::UsersState;

pub(crate) fn reduce(state: &mut UsersState, action: &Action) {
  match action {
    Action::EditUserAccount(_) => {
      state.is_editing = true;
    }
    Action::FinishEditUserAccount => {
      state.is_editing = false;
    }
    Action::LoadUserAccount { user } => {
      upsert(state, user);
    }
    Action::LoadCurrentUserAccount { user } => {
      state.current_user_id = Some(user.id);
      upsert(state, user);
    }
    Action::LoadUserNotifications {
      username,
      notifications,
    } => {
      state
        .notifications
        .insert(username.clone(), notifications.clone());
    }
    Action::UnloadUserAccount { user_id } => {
      if let Some(user) = state.by_id.remove(user_id) {
        state.by_username.remove(&user.username);
        state.notifications.remove(&user.username);
      }
      if state.current_user_id == Some(*user_id) {
        state.current_user_id = None;
      }
    }
    _ => {}
  }
}

fn upsert(state: &mut UsersState, user: &UserAccount) {
  state.by_username.insert(user.username.clone(), user.id);
  state.by_id.insert(user.id, user.clone());
}
