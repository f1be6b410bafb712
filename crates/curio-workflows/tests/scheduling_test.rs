//! Cross-workflow scheduling semantics: latest-wins preemption and the
//! clear-before-anything ordering guarantee.

mod support;

use curio_store::{Action, FetchCurrentCollection, UpdateCollection};

use support::{addons_page, collection_detail, handler_id, launch, ApiCall};

fn fetch_current_collection(slug: &str) -> Action {
  Action::FetchCurrentCollection(FetchCurrentCollection {
    error_handler_id: handler_id(),
    username: "some-user".to_string(),
    slug: slug.to_string(),
    page: None,
  })
}

#[tokio::test]
async fn a_second_trigger_of_the_same_kind_supersedes_the_first() {
  let mut harness = launch();
  // First invocation stalls mid-flight; the second completes.
  harness.api.collection_detail.hang();
  harness.api.collection_addons.hang();
  harness
    .api
    .collection_detail
    .ok(collection_detail(2, "second-slug", "some-user"));
  harness.api.collection_addons.ok(addons_page(&[9]));

  harness
    .handle
    .dispatch(fetch_current_collection("first-slug"))
    .unwrap();

  // Let the first invocation reach its API calls before superseding it.
  harness
    .api
    .wait_until(|calls| {
      calls
        .iter()
        .any(|call| matches!(call, ApiCall::GetCollectionDetail { slug, .. } if slug == "first-slug"))
        && calls
          .iter()
          .any(|call| matches!(call, ApiCall::GetCollectionAddons { slug, .. } if slug == "first-slug"))
    })
    .await;

  harness
    .handle
    .dispatch(fetch_current_collection("second-slug"))
    .unwrap();

  let loaded = harness
    .actions
    .wait_for(|action| matches!(action, Action::LoadCurrentCollection { .. }))
    .await;
  match loaded {
    Action::LoadCurrentCollection { detail, .. } => assert_eq!(detail.slug, "second-slug"),
    other => panic!("unexpected action: {other:?}"),
  }

  // Exactly one completed fetch, and it is the second one. The superseded
  // invocation emitted neither a load nor a failure.
  let loads = harness
    .actions
    .seen
    .iter()
    .filter(|action| matches!(action, Action::LoadCurrentCollection { .. }))
    .count();
  assert_eq!(loads, 1);
  assert!(!harness
    .actions
    .contains(|action| matches!(action, Action::SetError { .. })));
  assert!(!harness
    .actions
    .contains(|action| matches!(action, Action::AbortFetchCurrentCollection)));

  harness.handle.shutdown().await;
}

#[tokio::test]
async fn clearing_the_error_surface_precedes_every_other_event() {
  let mut harness = launch();
  harness.api.update_collection.hang();

  harness
    .handle
    .dispatch(Action::UpdateCollection(UpdateCollection {
      error_handler_id: handler_id(),
      username: "some-user".to_string(),
      collection_slug: "some-collection".to_string(),
      slug: None,
      name: None,
      description: None,
      default_locale: None,
    }))
    .unwrap();

  harness
    .actions
    .wait_for(|action| matches!(action, Action::BeginCollectionModification))
    .await;

  // The first thing the invocation emits is the clearing event; the
  // modification bracket opens after it.
  assert_eq!(
    harness.actions.seen[1],
    Action::ClearError { id: handler_id() }
  );

  harness.handle.shutdown().await;
}
