//! In-memory task store backing the stub server.
//!
//! Assigns ids the way the real API does and enforces the same create
//! validation rules, so the client sees bit-compatible behavior.

use tokio::sync::RwLock;

use taskdeck_model::keyword::Keyword;
use taskdeck_model::task::{NewTask, Task, TaskId};
use taskdeck_model::validation::FieldErrors;

/// Maximum title length accepted by the API.
const MAX_TITLE_LENGTH: usize = 255;

/// In-memory task and keyword store with server-assigned ids.
///
/// Thread-safe via [`RwLock`]. Tasks are kept in creation order; the list
/// endpoint returns them newest first. Keywords are fixed at construction,
/// matching their read-only role in the API.
pub struct StubStore {
    inner: RwLock<Inner>,
    keywords: Vec<Keyword>,
}

struct Inner {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Default for StubStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StubStore {
    /// Creates an empty store with no keywords.
    #[must_use]
    pub fn new() -> Self {
        Self::with_keywords(Vec::new())
    }

    /// Creates an empty store with a fixed keyword set.
    #[must_use]
    pub fn with_keywords(keywords: Vec<Keyword>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                tasks: Vec::new(),
                next_id: 1,
            }),
            keywords,
        }
    }

    /// Returns all tasks, newest-created first.
    pub async fn list_tasks(&self) -> Vec<Task> {
        let inner = self.inner.read().await;
        inner.tasks.iter().rev().cloned().collect()
    }

    /// The fixed keyword set.
    #[must_use]
    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    /// Validates and creates a task, assigning the next id.
    ///
    /// # Errors
    ///
    /// Returns the field-error map when the draft is invalid: missing or
    /// over-long title, or keyword ids not in the keyword set.
    pub async fn create(&self, draft: &NewTask) -> Result<Task, FieldErrors> {
        let mut errors = FieldErrors::new();
        if draft.title.trim().is_empty() {
            errors
                .entry("title".to_string())
                .or_default()
                .push("The title field is required.".to_string());
        } else if draft.title.chars().count() > MAX_TITLE_LENGTH {
            errors
                .entry("title".to_string())
                .or_default()
                .push("The title may not be greater than 255 characters.".to_string());
        }
        for id in &draft.keyword_ids {
            if !self.keywords.iter().any(|k| k.id == *id) {
                errors
                    .entry("keyword_ids".to_string())
                    .or_default()
                    .push(format!("Unknown keyword id {id}."));
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut inner = self.inner.write().await;
        let task = Task {
            id: TaskId::new(inner.next_id),
            title: draft.title.clone(),
            limit_date: draft.limit_date,
            is_done: false,
            keyword_ids: draft.keyword_ids.clone(),
        };
        inner.next_id += 1;
        inner.tasks.push(task.clone());
        Ok(task)
    }

    /// Flips a task's completion flag, returning the updated entity, or
    /// `None` if the id is unknown.
    pub async fn toggle(&self, id: TaskId) -> Option<Task> {
        let mut inner = self.inner.write().await;
        let task = inner.tasks.iter_mut().find(|t| t.id == id)?;
        task.is_done = !task.is_done;
        Some(task.clone())
    }

    /// Looks up a task by id.
    pub async fn task(&self, id: TaskId) -> Option<Task> {
        let inner = self.inner.read().await;
        inner.tasks.iter().find(|t| t.id == id).cloned()
    }
}
