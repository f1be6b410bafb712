//! User account workflows.

use tracing::warn;

use curio_engine::{Effects, Runtime, WorkflowError, WorkflowFuture};
use curio_store::{
  Action, ActionKind, DeleteUserAccount, DeleteUserPicture, EditUserAccount, FetchUserAccount,
  FetchUserNotifications, SetSessionToken,
};

use crate::util::ErrorHandler;

pub(crate) fn register(runtime: &mut Runtime) {
  runtime.take_latest(
    ActionKind::FetchUserAccount,
    |fx: Effects, action: Action| -> WorkflowFuture {
      Box::pin(async move {
        match action {
          Action::FetchUserAccount(payload) => fetch_user_account(&fx, payload).await,
          _ => Ok(()),
        }
      })
    },
  );
  runtime.take_latest(
    ActionKind::EditUserAccount,
    |fx: Effects, action: Action| -> WorkflowFuture {
      Box::pin(async move {
        match action {
          Action::EditUserAccount(payload) => edit_user_account(&fx, payload).await,
          _ => Ok(()),
        }
      })
    },
  );
  runtime.take_latest(
    ActionKind::DeleteUserAccount,
    |fx: Effects, action: Action| -> WorkflowFuture {
      Box::pin(async move {
        match action {
          Action::DeleteUserAccount(payload) => delete_user_account(&fx, payload).await,
          _ => Ok(()),
        }
      })
    },
  );
  runtime.take_latest(
    ActionKind::DeleteUserPicture,
    |fx: Effects, action: Action| -> WorkflowFuture {
      Box::pin(async move {
        match action {
          Action::DeleteUserPicture(payload) => delete_user_picture(&fx, payload).await,
          _ => Ok(()),
        }
      })
    },
  );
  runtime.take_latest(
    ActionKind::FetchUserNotifications,
    |fx: Effects, action: Action| -> WorkflowFuture {
      Box::pin(async move {
        match action {
          Action::FetchUserNotifications(payload) => fetch_user_notifications(&fx, payload).await,
          _ => Ok(()),
        }
      })
    },
  );
  runtime.take_latest(
    ActionKind::SetSessionToken,
    |fx: Effects, action: Action| -> WorkflowFuture {
      Box::pin(async move {
        match action {
          Action::SetSessionToken(payload) => fetch_current_user_account(&fx, payload).await,
          _ => Ok(()),
        }
      })
    },
  );
}

/// Fetch the account belonging to a freshly arrived session token.
///
/// Triggered by token arrival, not by the UI, so there is no error handler
/// to report through. A swallowed failure here would leave the user silently
/// signed out, so operation failures are deliberately left to escape to the
/// scheduler boundary where they are logged loudly.
async fn fetch_current_user_account(
  fx: &Effects,
  payload: SetSessionToken,
) -> Result<(), WorkflowError> {
  let session = fx.select(|state| state.api.clone()).await?;
  let session = session.with_token(payload.token);

  let user = fx
    .invoke(fx.api().get_current_user_account(&session))
    .await??;

  fx.put(Action::LoadCurrentUserAccount { user })?;
  Ok(())
}

async fn fetch_user_account(fx: &Effects, payload: FetchUserAccount) -> Result<(), WorkflowError> {
  let handler = ErrorHandler::new(payload.error_handler_id.clone());
  fx.put(handler.clear())?;

  let session = fx.select(|state| state.api.clone()).await?;

  let fetched = fx
    .invoke(fx.api().get_user_account(&session, &payload.username))
    .await?;

  match fetched {
    Ok(user) => {
      fx.put(Action::LoadUserAccount { user })?;
    }
    Err(error) => {
      warn!(error = %error, "user account failed to load");
      fx.put(handler.error(&error))?;
    }
  }
  Ok(())
}

/// Edit the account, chaining a notification-preferences update when one was
/// supplied. The edit-in-progress bracket is closed in a cleanup step
/// regardless of outcome.
async fn edit_user_account(fx: &Effects, payload: EditUserAccount) -> Result<(), WorkflowError> {
  let handler = ErrorHandler::new(payload.error_handler_id.clone());
  fx.put(handler.clear())?;

  let outcome = apply_account_edit(fx, &handler, &payload).await;

  fx.put(Action::FinishEditUserAccount)?;
  outcome
}

async fn apply_account_edit(
  fx: &Effects,
  handler: &ErrorHandler,
  payload: &EditUserAccount,
) -> Result<(), WorkflowError> {
  let session = fx.select(|state| state.api.clone()).await?;

  let edited = fx
    .invoke(fx.api().edit_user_account(
      &session,
      payload.user_id,
      payload.picture.as_deref(),
      &payload.fields,
    ))
    .await?;

  let user = match edited {
    Ok(user) => user,
    Err(error) => {
      warn!(error = %error, "could not edit user account");
      fx.put(handler.error(&error))?;
      return Ok(());
    }
  };

  // Notifications are keyed by the username the edit came back with, which
  // may itself have just changed.
  let username = user.username.clone();
  fx.put(Action::LoadUserAccount { user })?;

  if payload.notifications.is_empty() {
    return Ok(());
  }

  let updated = fx
    .invoke(fx.api().update_user_notifications(
      &session,
      payload.user_id,
      &payload.notifications,
    ))
    .await?;

  match updated {
    Ok(notifications) => {
      fx.put(Action::LoadUserNotifications {
        username,
        notifications,
      })?;
    }
    Err(error) => {
      warn!(error = %error, "could not edit user account");
      fx.put(handler.error(&error))?;
    }
  }
  Ok(())
}

async fn fetch_user_notifications(
  fx: &Effects,
  payload: FetchUserNotifications,
) -> Result<(), WorkflowError> {
  let handler = ErrorHandler::new(payload.error_handler_id.clone());
  fx.put(handler.clear())?;

  let session = fx.select(|state| state.api.clone()).await?;

  let fetched = fx
    .invoke(fx.api().get_user_notifications(&session, &payload.username))
    .await?;

  match fetched {
    Ok(notifications) => {
      fx.put(Action::LoadUserNotifications {
        username: payload.username.clone(),
        notifications,
      })?;
    }
    Err(error) => {
      warn!(error = %error, "user notifications failed to load");
      fx.put(handler.error(&error))?;
    }
  }
  Ok(())
}

async fn delete_user_picture(fx: &Effects, payload: DeleteUserPicture) -> Result<(), WorkflowError> {
  let handler = ErrorHandler::new(payload.error_handler_id.clone());
  fx.put(handler.clear())?;

  let session = fx.select(|state| state.api.clone()).await?;

  let deleted = fx
    .invoke(fx.api().delete_user_picture(&session, payload.user_id))
    .await?;

  match deleted {
    Ok(user) => {
      fx.put(Action::LoadUserAccount { user })?;
    }
    Err(error) => {
      warn!(error = %error, "could not delete user picture");
      fx.put(handler.error(&error))?;
    }
  }
  Ok(())
}

async fn delete_user_account(fx: &Effects, payload: DeleteUserAccount) -> Result<(), WorkflowError> {
  let handler = ErrorHandler::new(payload.error_handler_id.clone());
  fx.put(handler.clear())?;

  let session = fx.select(|state| state.api.clone()).await?;

  let deleted = fx
    .invoke(fx.api().delete_user_account(&session, payload.user_id))
    .await?;

  match deleted {
    Ok(()) => {
      fx.put(Action::UnloadUserAccount {
        user_id: payload.user_id,
      })?;
    }
    Err(error) => {
      warn!(error = %error, "could not delete user account");
      fx.put(handler.error(&error))?;
    }
  }
  Ok(())
}
