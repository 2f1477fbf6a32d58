//! Integration tests for task creation against the stub API.
//!
//! Validates the round-trip property (the server entity, not the draft,
//! becomes the list head and the draft resets), the 422 validation path,
//! and banner behavior for non-validation failures.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use chrono::NaiveDate;
use taskdeck::config::ClientConfig;
use taskdeck::list::TaskList;
use taskdeck::store::RemoteTaskStore;
use taskdeck_model::keyword::{Keyword, KeywordId};
use taskdeck_model::task::{NewTask, TaskId};
use taskdeck_stub::store::StubStore;

/// Starts the stub API in-process and returns its base URL, the shared
/// store handle, and the server task handle.
async fn start_stub(
    keywords: Vec<Keyword>,
) -> (String, Arc<StubStore>, tokio::task::JoinHandle<()>) {
    let store = Arc::new(StubStore::with_keywords(keywords));
    let (addr, handle) = taskdeck_stub::server::start_server("127.0.0.1:0", Arc::clone(&store))
        .await
        .expect("failed to start stub server");
    (format!("http://{addr}/api"), store, handle)
}

/// Builds a controller pointed at the given base URL.
fn client(base_url: &str) -> TaskList<RemoteTaskStore> {
    let config = ClientConfig {
        base_url: base_url.to_string(),
        ..ClientConfig::default()
    };
    TaskList::new(RemoteTaskStore::new(&config).expect("client construction"))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn create_prepends_server_entity_and_resets_draft() {
    let (base, store, _handle) = start_stub(vec![Keyword::new(2, "home")]).await;
    // An existing task so the new one demonstrably lands at the head.
    store
        .create(&NewTask {
            title: "Existing".to_string(),
            limit_date: None,
            keyword_ids: Vec::new(),
        })
        .await
        .unwrap();

    let mut list = client(&base);
    list.load().await;

    let draft = list.draft_mut();
    draft.title = "Buy milk".to_string();
    draft.limit_date = Some(date(2024, 5, 20));
    draft.keyword_ids = vec![KeywordId::new(2)];
    list.create().await;

    assert_eq!(list.tasks().len(), 2);
    let head = &list.tasks()[0];
    assert_eq!(head.id, TaskId::new(2), "server-assigned id");
    assert_eq!(head.title, "Buy milk");
    assert_eq!(head.limit_date, Some(date(2024, 5, 20)));
    assert!(!head.is_done);
    assert_eq!(head.keyword_ids, vec![KeywordId::new(2)]);

    assert_eq!(*list.draft(), NewTask::default());
    assert!(list.validation_errors().is_empty());
    assert_eq!(list.error(), None);
    assert!(!list.is_loading());

    // The client's head and the server's entity converged.
    assert_eq!(store.task(head.id).await.as_ref(), Some(head));
}

#[tokio::test]
async fn create_with_empty_title_populates_validation_errors() {
    let (base, store, _handle) = start_stub(Vec::new()).await;

    let mut list = client(&base);
    list.draft_mut().limit_date = Some(date(2024, 5, 20));
    list.create().await;

    assert_eq!(
        list.validation_errors()["title"],
        vec!["The title field is required."]
    );
    // Field detail takes precedence; no banner.
    assert_eq!(list.error(), None);
    // Draft stays intact for correction.
    assert_eq!(list.draft().limit_date, Some(date(2024, 5, 20)));
    // Nothing was created server-side.
    assert!(store.list_tasks().await.is_empty());
}

#[tokio::test]
async fn create_with_unknown_keyword_populates_validation_errors() {
    let (base, _store, _handle) = start_stub(vec![Keyword::new(1, "urgent")]).await;

    let mut list = client(&base);
    let draft = list.draft_mut();
    draft.title = "Task".to_string();
    draft.keyword_ids = vec![KeywordId::new(9)];
    list.create().await;

    assert_eq!(
        list.validation_errors()["keyword_ids"],
        vec!["Unknown keyword id 9."]
    );
    assert_eq!(list.error(), None);
}

#[tokio::test]
async fn second_attempt_replaces_validation_errors_wholesale() {
    let (base, _store, _handle) = start_stub(vec![Keyword::new(1, "urgent")]).await;

    let mut list = client(&base);
    list.create().await;
    assert!(list.validation_errors().contains_key("title"));

    let draft = list.draft_mut();
    draft.title = "Now valid".to_string();
    draft.keyword_ids = vec![KeywordId::new(9)];
    list.create().await;

    assert!(!list.validation_errors().contains_key("title"));
    assert!(list.validation_errors().contains_key("keyword_ids"));
}

#[tokio::test]
async fn create_against_unreachable_endpoint_sets_banner_and_keeps_draft() {
    let mut list = client("http://127.0.0.1:1/api");
    list.draft_mut().title = "Buy milk".to_string();
    list.create().await;

    assert_eq!(
        list.error(),
        Some("Something went wrong while creating the task.")
    );
    assert!(list.validation_errors().is_empty());
    assert_eq!(list.draft().title, "Buy milk");
    assert!(list.tasks().is_empty());
}
