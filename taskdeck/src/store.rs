//! Typed client for the remote task API.
//!
//! [`RemoteTaskStore`] translates the four task-list operations into HTTP
//! requests against a base endpoint and maps every failure into a
//! [`StoreError`] exactly once, at this boundary. Callers match on the
//! classified variant and never inspect transport errors themselves.

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use taskdeck_model::keyword::Keyword;
use taskdeck_model::task::{NewTask, Task, TaskId};
use taskdeck_model::validation::{ErrorBody, FieldErrors};

use crate::config::ClientConfig;

/// Classified error produced at the transport boundary.
///
/// Every operation failure is exactly one of these; none of them is fatal
/// to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The server responded with a non-2xx status.
    #[error("server rejected the request (status {status})")]
    ServerRejected {
        /// HTTP status code of the response.
        status: u16,
        /// Parsed structured body; empty if the body was not JSON.
        body: ErrorBody,
    },
    /// The request was sent but no response was received (timeout,
    /// connection failure).
    #[error("could not reach the task server: {0}")]
    Unreachable(String),
    /// The request could not be constructed, or its response body could
    /// not be decoded.
    #[error("internal client error: {0}")]
    ClientFault(String),
}

impl StoreError {
    /// Server-provided summary message, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::ServerRejected { body, .. } => body.message.as_deref(),
            Self::Unreachable(_) | Self::ClientFault(_) => None,
        }
    }

    /// Field-level validation errors, present only for an HTTP 422
    /// response that carried a non-empty `errors` map.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::ServerRejected { status: 422, body } if !body.errors.is_empty() => {
                Some(&body.errors)
            }
            _ => None,
        }
    }
}

/// Maps a transport-level error into its classification.
///
/// Request-construction and body-decode failures are client faults; every
/// other transport error means the request got no usable response.
fn classify(err: &reqwest::Error) -> StoreError {
    if err.is_builder() || err.is_decode() {
        StoreError::ClientFault(err.to_string())
    } else {
        StoreError::Unreachable(err.to_string())
    }
}

/// The four operations the task-list controller needs from a backing
/// store.
///
/// [`RemoteTaskStore`] is the production implementation; tests substitute
/// scripted in-memory stores so controller semantics can be exercised
/// without a network.
#[allow(async_fn_in_trait)]
pub trait TaskStore {
    /// Fetches all tasks.
    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError>;

    /// Fetches the read-only keyword reference data.
    async fn list_keywords(&self) -> Result<Vec<Keyword>, StoreError>;

    /// Creates a task from a draft, returning the server's entity.
    async fn create_task(&self, draft: &NewTask) -> Result<Task, StoreError>;

    /// Flips a task's completion status; the server decides the new value.
    async fn toggle_task(&self, id: TaskId) -> Result<Task, StoreError>;
}

/// HTTP implementation of [`TaskStore`] over a base API endpoint.
///
/// Sends and accepts JSON; the transport timeout comes from
/// [`ClientConfig`]. This type classifies errors and forwards them, it
/// never recovers from them.
#[derive(Debug)]
pub struct RemoteTaskStore {
    http: reqwest::Client,
    base_url: Url,
}

impl RemoteTaskStore {
    /// Builds a store from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ClientFault`] if the base URL is invalid or
    /// the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, StoreError> {
        // A trailing slash makes Url::join treat the last path segment as
        // a directory instead of replacing it.
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| StoreError::ClientFault(format!("invalid base URL {base:?}: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| classify(&e))?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, StoreError> {
        self.base_url
            .join(path)
            .map_err(|e| StoreError::ClientFault(format!("invalid endpoint {path:?}: {e}")))
    }

    /// Splits a response into the parsed success entity or a classified
    /// error carrying the structured body.
    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StoreError> {
        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(|e| classify(&e));
        }
        // Non-JSON error bodies degrade to an empty structured body.
        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        Err(StoreError::ServerRejected {
            status: status.as_u16(),
            body,
        })
    }
}

impl TaskStore for RemoteTaskStore {
    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let url = self.endpoint("tasks")?;
        let response = self.http.get(url).send().await.map_err(|e| classify(&e))?;
        Self::read(response).await
    }

    async fn list_keywords(&self) -> Result<Vec<Keyword>, StoreError> {
        let url = self.endpoint("keywords")?;
        let response = self.http.get(url).send().await.map_err(|e| classify(&e))?;
        Self::read(response).await
    }

    async fn create_task(&self, draft: &NewTask) -> Result<Task, StoreError> {
        let url = self.endpoint("tasks")?;
        let response = self
            .http
            .post(url)
            .json(draft)
            .send()
            .await
            .map_err(|e| classify(&e))?;
        Self::read(response).await
    }

    async fn toggle_task(&self, id: TaskId) -> Result<Task, StoreError> {
        let url = self.endpoint(&format!("tasks/{id}/toggle"))?;
        let response = self
            .http
            .patch(url)
            .send()
            .await
            .map_err(|e| classify(&e))?;
        Self::read(response).await
    }
}
