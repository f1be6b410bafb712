//! Test harness: a programmable API fake, an action-log tap reader, and a
//! launched engine with every workflow registered.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::mpsc;
use tokio::time::timeout;

use curio_api::{
  ApiError, ApiSession, CollectionAddon, CollectionAddonsPage, CollectionDetail, CollectionsApi,
  CreateCollectionParams, LocalizedString, Notification, NotificationUpdates,
  UpdateCollectionParams, UserAccount, UserEditableFields, UsersApi,
};
use curio_engine::{Runtime, RuntimeHandle};
use curio_store::{Action, AppState, ErrorHandlerId};

const WAIT: Duration = Duration::from_secs(2);

/// One recorded API call with the arguments it received.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
  GetCollectionDetail {
    session: ApiSession,
    username: String,
    slug: String,
  },
  GetCollectionAddons {
    session: ApiSession,
    username: String,
    slug: String,
    page: u32,
  },
  GetAllUserCollections {
    session: ApiSession,
    username: String,
  },
  CreateCollectionAddon {
    session: ApiSession,
    username: String,
    slug: String,
    addon_id: u64,
    notes: Option<String>,
  },
  RemoveCollectionAddon {
    session: ApiSession,
    username: String,
    slug: String,
    addon_id: u64,
  },
  CreateCollection {
    session: ApiSession,
    username: String,
    params: CreateCollectionParams,
  },
  UpdateCollection {
    session: ApiSession,
    username: String,
    collection_slug: String,
    changes: UpdateCollectionParams,
  },
  DeleteCollection {
    session: ApiSession,
    username: String,
    slug: String,
  },
  GetUserAccount {
    session: ApiSession,
    username: String,
  },
  EditUserAccount {
    session: ApiSession,
    user_id: u64,
    picture: Option<Vec<u8>>,
    fields: UserEditableFields,
  },
  GetUserNotifications {
    session: ApiSession,
    username: String,
  },
  UpdateUserNotifications {
    session: ApiSession,
    user_id: u64,
    notifications: NotificationUpdates,
  },
  DeleteUserPicture {
    session: ApiSession,
    user_id: u64,
  },
  DeleteUserAccount {
    session: ApiSession,
    user_id: u64,
  },
  GetCurrentUserAccount {
    session: ApiSession,
  },
}

/// A queued reply for one operation.
enum Reply<T> {
  Now(Result<T, ApiError>),
  /// Never resolves; the invocation stalls at this call until cancelled.
  Hang,
}

pub struct Queue<T>(Mutex<VecDeque<Reply<T>>>);

impl<T> Default for Queue<T> {
  fn default() -> Self {
    Self(Mutex::new(VecDeque::new()))
  }
}

impl<T> Queue<T> {
  pub fn ok(&self, value: T) {
    self.0.lock().unwrap().push_back(Reply::Now(Ok(value)));
  }

  pub fn err(&self, error: ApiError) {
    self.0.lock().unwrap().push_back(Reply::Now(Err(error)));
  }

  pub fn hang(&self) {
    self.0.lock().unwrap().push_back(Reply::Hang);
  }

  async fn take(&self, operation: &'static str) -> Result<T, ApiError> {
    let reply = self.0.lock().unwrap().pop_front();
    match reply {
      Some(Reply::Now(result)) => result,
      Some(Reply::Hang) => std::future::pending().await,
      None => panic!("unexpected call to {operation}"),
    }
  }
}

/// An [`Api`](curio_api::Api) double: every operation records its arguments
/// and consumes the next queued reply (panicking on an unqueued call).
#[derive(Default)]
pub struct FakeApi {
  calls: Mutex<Vec<ApiCall>>,
  pub collection_detail: Queue<CollectionDetail>,
  pub collection_addons: Queue<CollectionAddonsPage>,
  pub all_user_collections: Queue<Vec<CollectionDetail>>,
  pub create_collection_addon: Queue<()>,
  pub remove_collection_addon: Queue<()>,
  pub create_collection: Queue<CollectionDetail>,
  pub update_collection: Queue<()>,
  pub delete_collection: Queue<()>,
  pub user_account: Queue<UserAccount>,
  pub edit_user_account: Queue<UserAccount>,
  pub user_notifications: Queue<Vec<Notification>>,
  pub update_user_notifications: Queue<Vec<Notification>>,
  pub delete_user_picture: Queue<UserAccount>,
  pub delete_user_account: Queue<()>,
  pub current_user_account: Queue<UserAccount>,
}

impl FakeApi {
  fn record(&self, call: ApiCall) {
    self.calls.lock().unwrap().push(call);
  }

  pub fn calls(&self) -> Vec<ApiCall> {
    self.calls.lock().unwrap().clone()
  }

  /// Poll until the recorded calls satisfy `predicate`.
  pub async fn wait_until(&self, predicate: impl Fn(&[ApiCall]) -> bool) {
    timeout(WAIT, async {
      loop {
        if predicate(&self.calls.lock().unwrap()) {
          return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
      }
    })
    .await
    .expect("timed out waiting for API calls");
  }
}

#[async_trait]
impl CollectionsApi for FakeApi {
  async fn get_collection_detail(
    &self,
    session: &ApiSession,
    username: &str,
    slug: &str,
  ) -> Result<CollectionDetail, ApiError> {
    self.record(ApiCall::GetCollectionDetail {
      session: session.clone(),
      username: username.to_string(),
      slug: slug.to_string(),
    });
    self.collection_detail.take("get_collection_detail").await
  }

  async fn get_collection_addons(
    &self,
    session: &ApiSession,
    username: &str,
    slug: &str,
    page: u32,
  ) -> Result<CollectionAddonsPage, ApiError> {
    self.record(ApiCall::GetCollectionAddons {
      session: session.clone(),
      username: username.to_string(),
      slug: slug.to_string(),
      page,
    });
    self.collection_addons.take("get_collection_addons").await
  }

  async fn get_all_user_collections(
    &self,
    session: &ApiSession,
    username: &str,
  ) -> Result<Vec<CollectionDetail>, ApiError> {
    self.record(ApiCall::GetAllUserCollections {
      session: session.clone(),
      username: username.to_string(),
    });
    self
      .all_user_collections
      .take("get_all_user_collections")
      .await
  }

  async fn create_collection_addon(
    &self,
    session: &ApiSession,
    username: &str,
    slug: &str,
    addon_id: u64,
    notes: Option<&str>,
  ) -> Result<(), ApiError> {
    self.record(ApiCall::CreateCollectionAddon {
      session: session.clone(),
      username: username.to_string(),
      slug: slug.to_string(),
      addon_id,
      notes: notes.map(str::to_string),
    });
    self
      .create_collection_addon
      .take("create_collection_addon")
      .await
  }

  async fn remove_collection_addon(
    &self,
    session: &ApiSession,
    username: &str,
    slug: &str,
    addon_id: u64,
  ) -> Result<(), ApiError> {
    self.record(ApiCall::RemoveCollectionAddon {
      session: session.clone(),
      username: username.to_string(),
      slug: slug.to_string(),
      addon_id,
    });
    self
      .remove_collection_addon
      .take("remove_collection_addon")
      .await
  }

  async fn create_collection(
    &self,
    session: &ApiSession,
    username: &str,
    params: &CreateCollectionParams,
  ) -> Result<CollectionDetail, ApiError> {
    self.record(ApiCall::CreateCollection {
      session: session.clone(),
      username: username.to_string(),
      params: params.clone(),
    });
    self.create_collection.take("create_collection").await
  }

  async fn update_collection(
    &self,
    session: &ApiSession,
    username: &str,
    collection_slug: &str,
    changes: &UpdateCollectionParams,
  ) -> Result<(), ApiError> {
    self.record(ApiCall::UpdateCollection {
      session: session.clone(),
      username: username.to_string(),
      collection_slug: collection_slug.to_string(),
      changes: changes.clone(),
    });
    self.update_collection.take("update_collection").await
  }

  async fn delete_collection(
    &self,
    session: &ApiSession,
    username: &str,
    slug: &str,
  ) -> Result<(), ApiError> {
    self.record(ApiCall::DeleteCollection {
      session: session.clone(),
      username: username.to_string(),
      slug: slug.to_string(),
    });
    self.delete_collection.take("delete_collection").await
  }
}

#[async_trait]
impl UsersApi for FakeApi {
  async fn get_user_account(
    &self,
    session: &ApiSession,
    username: &str,
  ) -> Result<UserAccount, ApiError> {
    self.record(ApiCall::GetUserAccount {
      session: session.clone(),
      username: username.to_string(),
    });
    self.user_account.take("get_user_account").await
  }

  async fn edit_user_account(
    &self,
    session: &ApiSession,
    user_id: u64,
    picture: Option<&[u8]>,
    fields: &UserEditableFields,
  ) -> Result<UserAccount, ApiError> {
    self.record(ApiCall::EditUserAccount {
      session: session.clone(),
      user_id,
      picture: picture.map(<[u8]>::to_vec),
      fields: fields.clone(),
    });
    self.edit_user_account.take("edit_user_account").await
  }

  async fn get_user_notifications(
    &self,
    session: &ApiSession,
    username: &str,
  ) -> Result<Vec<Notification>, ApiError> {
    self.record(ApiCall::GetUserNotifications {
      session: session.clone(),
      username: username.to_string(),
    });
    self.user_notifications.take("get_user_notifications").await
  }

  async fn update_user_notifications(
    &self,
    session: &ApiSession,
    user_id: u64,
    notifications: &NotificationUpdates,
  ) -> Result<Vec<Notification>, ApiError> {
    self.record(ApiCall::UpdateUserNotifications {
      session: session.clone(),
      user_id,
      notifications: notifications.clone(),
    });
    self
      .update_user_notifications
      .take("update_user_notifications")
      .await
  }

  async fn delete_user_picture(
    &self,
    session: &ApiSession,
    user_id: u64,
  ) -> Result<UserAccount, ApiError> {
    self.record(ApiCall::DeleteUserPicture {
      session: session.clone(),
      user_id,
    });
    self.delete_user_picture.take("delete_user_picture").await
  }

  async fn delete_user_account(&self, session: &ApiSession, user_id: u64) -> Result<(), ApiError> {
    self.record(ApiCall::DeleteUserAccount {
      session: session.clone(),
      user_id,
    });
    self.delete_user_account.take("delete_user_account").await
  }

  async fn get_current_user_account(&self, session: &ApiSession) -> Result<UserAccount, ApiError> {
    self.record(ApiCall::GetCurrentUserAccount {
      session: session.clone(),
    });
    self
      .current_user_account
      .take("get_current_user_account")
      .await
  }
}

/// Reads the engine's action tap, remembering everything seen so tests can
/// assert on emission order after the fact.
pub struct ActionLog {
  rx: mpsc::UnboundedReceiver<Action>,
  pub seen: Vec<Action>,
}

impl ActionLog {
  fn new(rx: mpsc::UnboundedReceiver<Action>) -> Self {
    Self {
      rx,
      seen: Vec::new(),
    }
  }

  /// Consume actions until one matches, returning it.
  pub async fn wait_for(&mut self, predicate: impl Fn(&Action) -> bool) -> Action {
    let deadline = tokio::time::Instant::now() + WAIT;
    loop {
      let action = tokio::time::timeout_at(deadline, self.rx.recv())
        .await
        .expect("timed out waiting for an action")
        .expect("engine stopped");
      self.seen.push(action.clone());
      if predicate(&action) {
        return action;
      }
    }
  }

  /// Position of the first seen action matching `predicate`.
  pub fn index_of(&self, predicate: impl Fn(&Action) -> bool) -> Option<usize> {
    self.seen.iter().position(predicate)
  }

  pub fn contains(&self, predicate: impl Fn(&Action) -> bool) -> bool {
    self.index_of(predicate).is_some()
  }
}

/// A running engine with every workflow registered against a [`FakeApi`].
pub struct Harness {
  pub api: Arc<FakeApi>,
  pub handle: RuntimeHandle,
  pub actions: ActionLog,
}

pub fn launch() -> Harness {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .try_init();

  let api = Arc::new(FakeApi::default());
  let mut runtime = Runtime::new(api.clone(), AppState::new(session()));
  let tap = runtime.tap();
  curio_workflows::register(&mut runtime);

  Harness {
    api,
    handle: runtime.spawn(),
    actions: ActionLog::new(tap),
  }
}

/// The session the harness starts with.
pub fn session() -> ApiSession {
  ApiSession::new("en-US", "firefox")
}

pub fn handler_id() -> ErrorHandlerId {
  ErrorHandlerId::new("error-handler-1")
}

pub fn api_error() -> ApiError {
  ApiError::Request {
    message: "some API error maybe".to_string(),
  }
}

pub fn collection_detail(id: u64, slug: &str, username: &str) -> CollectionDetail {
  CollectionDetail {
    id,
    slug: slug.to_string(),
    author_username: username.to_string(),
    name: LocalizedString::in_locale("en-US", "Some collection"),
    description: LocalizedString::in_locale("en-US", "A collection of add-ons"),
    default_locale: "en-US".to_string(),
    addon_count: 0,
    modified: Utc.with_ymd_and_hms(2018, 3, 15, 12, 0, 0).unwrap(),
  }
}

pub fn addons_page(addon_ids: &[u64]) -> CollectionAddonsPage {
  CollectionAddonsPage {
    addons: addon_ids
      .iter()
      .map(|&addon_id| CollectionAddon {
        addon_id,
        name: format!("addon-{addon_id}"),
        notes: None,
      })
      .collect(),
    count: addon_ids.len() as u64,
  }
}

pub fn user_account(id: u64, username: &str) -> UserAccount {
  UserAccount {
    id,
    username: username.to_string(),
    display_name: None,
    biography: None,
    homepage: None,
    location: None,
    occupation: None,
    picture_url: Some(format!("https://example.org/{username}.png")),
  }
}
