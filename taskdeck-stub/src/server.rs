//! Axum routes implementing the task API contract.
//!
//! The route shapes and status codes match the upstream API: 201 on
//! create, 422 with a structured `{message, errors}` body on validation
//! failure, 404 with a message body for toggling an unknown task.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};

use taskdeck_model::keyword::Keyword;
use taskdeck_model::task::{NewTask, Task, TaskId};
use taskdeck_model::validation::ErrorBody;

use crate::store::StubStore;

/// Builds the API router over a shared store, with all routes under `/api`.
pub fn router(store: Arc<StubStore>) -> axum::Router {
    let api = axum::Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}/toggle", patch(toggle_task))
        .route("/keywords", get(list_keywords))
        .with_state(store);
    axum::Router::new().nest("/api", api)
}

async fn list_tasks(State(store): State<Arc<StubStore>>) -> Json<Vec<Task>> {
    Json(store.list_tasks().await)
}

async fn list_keywords(State(store): State<Arc<StubStore>>) -> Json<Vec<Keyword>> {
    Json(store.keywords().to_vec())
}

async fn create_task(
    State(store): State<Arc<StubStore>>,
    Json(draft): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>), (StatusCode, Json<ErrorBody>)> {
    match store.create(&draft).await {
        Ok(task) => {
            tracing::info!(id = %task.id, "task created");
            Ok((StatusCode::CREATED, Json(task)))
        }
        Err(errors) => {
            tracing::debug!(fields = errors.len(), "create rejected");
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorBody::validation("The given data was invalid.", errors)),
            ))
        }
    }
}

async fn toggle_task(
    State(store): State<Arc<StubStore>>,
    Path(id): Path<u64>,
) -> Result<Json<Task>, (StatusCode, Json<ErrorBody>)> {
    match store.toggle(TaskId::new(id)).await {
        Some(task) => Ok(Json(task)),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorBody::message(format!("Task {id} not found."))),
        )),
    }
}

/// Starts the stub server and returns the bound address and a join handle.
///
/// This is the entry point used by both `main.rs` and test code; tests
/// bind to `127.0.0.1:0` for an OS-assigned port.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
    store: Arc<StubStore>,
) -> std::io::Result<(std::net::SocketAddr, tokio::task::JoinHandle<()>)> {
    let app = router(store);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "stub server error");
        }
    });

    Ok((bound_addr, handle))
}
