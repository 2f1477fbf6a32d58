//! Integration tests for optimistic toggles and rollback against the
//! stub API.
//!
//! Validates convergence with the server entity on success, snapshot
//! restoration on failure, and the unknown-id no-op guard.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use taskdeck::config::ClientConfig;
use taskdeck::list::TaskList;
use taskdeck::store::RemoteTaskStore;
use taskdeck_model::task::{NewTask, TaskId};
use taskdeck_stub::store::StubStore;

/// Starts the stub API in-process and returns its base URL, the shared
/// store handle, and the server task handle.
async fn start_stub() -> (String, Arc<StubStore>, tokio::task::JoinHandle<()>) {
    let store = Arc::new(StubStore::new());
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

fn draft(title: &str) -> NewTask {
    NewTask {
        title: title.to_string(),
        limit_date: None,
        keyword_ids: Vec::new(),
    }
}

#[tokio::test]
async fn toggle_converges_with_server_state() {
    let (base, store, _handle) = start_stub().await;
    let task = store.create(&draft("Task")).await.unwrap();

    let mut list = client(&base);
    list.load().await;
    list.toggle(task.id).await;

    assert!(list.tasks()[0].is_done);
    assert_eq!(list.error(), None);
    assert!(store.task(task.id).await.unwrap().is_done);

    // And back again.
    list.toggle(task.id).await;
    assert!(!list.tasks()[0].is_done);
    assert!(!store.task(task.id).await.unwrap().is_done);
}

#[tokio::test]
async fn toggle_failure_reverts_the_optimistic_flip() {
    let (base, store, handle) = start_stub().await;
    let task = store.create(&draft("Task")).await.unwrap();

    let mut list = client(&base);
    list.load().await;
    assert!(!list.tasks()[0].is_done);

    handle.abort();
    let _ = handle.await;

    list.toggle(task.id).await;

    assert!(!list.tasks()[0].is_done, "flip must be rolled back");
    assert_eq!(list.error(), Some("Could not update the task status."));
}

#[tokio::test]
async fn toggle_unreachable_endpoint_reverts_without_panicking() {
    // Cached list with one incomplete task; the endpoint refuses
    // connections, so the request is sent and classified Unreachable.
    let (base, store, handle) = start_stub().await;
    store.create(&draft("Only task")).await.unwrap();

    let mut list = client(&base);
    list.load().await;

    handle.abort();
    let _ = handle.await;

    list.toggle(TaskId::new(1)).await;

    assert_eq!(list.tasks().len(), 1);
    assert!(!list.tasks()[0].is_done);
    assert_eq!(list.error(), Some("Could not update the task status."));
}

#[tokio::test]
async fn toggle_uncached_id_is_a_silent_noop() {
    let (base, store, _handle) = start_stub().await;
    let task = store.create(&draft("Task")).await.unwrap();

    let mut list = client(&base);
    list.load().await;

    // Stale UI callback with an id that is not in the cache.
    list.toggle(TaskId::new(99)).await;
    assert_eq!(list.error(), None);
    assert_eq!(list.tasks().len(), 1);
    assert!(!list.tasks()[0].is_done);

    // A genuine toggle still works afterwards.
    list.toggle(task.id).await;
    assert!(list.tasks()[0].is_done);
}
