//! Task-list state and optimistic synchronization against a [`TaskStore`].
//!
//! [`TaskList`] owns the cached task list, the keyword reference data, the
//! create-form draft, and the error/loading flags. Each operation is a
//! request/response cycle: state mutates either after the store confirms
//! (load, create) or speculatively with a snapshot to restore on failure
//! (toggle). After any completed operation the cache and the remote store
//! agree, or a user-facing message explains why they might not.
//!
//! Overlapping in-flight operations are not coordinated; `&mut self` on
//! every operation means a single controller instance can only run them
//! one at a time anyway.

use chrono::{Local, NaiveDate};

use taskdeck_model::keyword::Keyword;
use taskdeck_model::task::{DueStatus, NewTask, Task, TaskId};
use taskdeck_model::validation::FieldErrors;

use crate::store::{StoreError, TaskStore};

/// Fallback message when a list refresh fails without a server message.
const LOAD_FAILED: &str = "Could not load tasks from the server.";
/// Fallback message when task creation fails for a non-validation reason.
const CREATE_FAILED: &str = "Something went wrong while creating the task.";
/// Fallback message when a toggle fails and the flip is rolled back.
const TOGGLE_FAILED: &str = "Could not update the task status.";

/// Presentation surface owning the actual show/hide of the create-task
/// dialog.
///
/// The controller only drives the lifecycle; rendering is external. The
/// surface's own dismissal event should call
/// [`TaskList::reset_and_clear_form`].
pub trait ModalSurface {
    /// Makes the create-task surface visible.
    fn show(&mut self);

    /// Hides the create-task surface.
    fn hide(&mut self);
}

/// Surface for headless use (CLI, tests without a dialog).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSurface;

impl ModalSurface for NoopSurface {
    fn show(&mut self) {}
    fn hide(&mut self) {}
}

/// Today's date, the lower bound for the draft's date picker.
#[must_use]
pub fn min_date() -> NaiveDate {
    Local::now().date_naive()
}

/// Due-date classification of a task against today's local date.
#[must_use]
pub fn due_status_today(task: &Task) -> Option<DueStatus> {
    task.due_status(Local::now().date_naive())
}

/// Cached task-list state bound to a backing store.
pub struct TaskList<S, M = NoopSurface> {
    store: S,
    surface: M,
    tasks: Vec<Task>,
    available_keywords: Vec<Keyword>,
    draft: NewTask,
    is_loading: bool,
    error: Option<String>,
    validation_errors: FieldErrors,
}

impl<S: TaskStore> TaskList<S> {
    /// Creates a controller without a presentation surface.
    pub fn new(store: S) -> Self {
        Self::with_surface(store, NoopSurface)
    }
}

impl<S: TaskStore, M: ModalSurface> TaskList<S, M> {
    /// Creates a controller bound to a store and a presentation surface.
    pub fn with_surface(store: S, surface: M) -> Self {
        Self {
            store,
            surface,
            tasks: Vec::new(),
            available_keywords: Vec::new(),
            draft: NewTask::default(),
            is_loading: false,
            error: None,
            validation_errors: FieldErrors::new(),
        }
    }

    /// Refreshes the cached task list from the store.
    ///
    /// On success the cache is replaced wholesale. On failure the previous
    /// cache is kept untouched and a user-facing message is surfaced,
    /// preferring the server's own message over the generic one.
    pub async fn load(&mut self) {
        self.is_loading = true;
        self.error = None;
        match self.store.list_tasks().await {
            Ok(tasks) => self.tasks = tasks,
            Err(e) => {
                tracing::warn!(error = %e, "task list refresh failed");
                self.error = Some(banner_message(&e, LOAD_FAILED));
            }
        }
        self.is_loading = false;
    }

    /// Fetches the keyword reference data.
    ///
    /// Failures are logged but never surfaced as a banner; the create
    /// form degrades to one without keyword suggestions. The returned
    /// result lets callers that need a hard signal react, so an empty
    /// keyword set stays distinguishable from a failed fetch.
    ///
    /// # Errors
    ///
    /// Returns the classified store error when the fetch fails.
    pub async fn load_keywords(&mut self) -> Result<(), StoreError> {
        match self.store.list_keywords().await {
            Ok(keywords) => {
                self.available_keywords = keywords;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "keyword fetch failed");
                Err(e)
            }
        }
    }

    /// Submits the draft as a new task.
    ///
    /// On success the server-returned entity (not the draft) is prepended
    /// to the cache, the draft resets, and the surface closes. On a 422
    /// rejection with field detail, [`Self::validation_errors`] is replaced
    /// wholesale and the draft stays intact for correction. Any other
    /// failure sets the error banner, also leaving the draft intact.
    pub async fn create(&mut self) {
        self.is_loading = true;
        self.error = None;
        self.validation_errors = FieldErrors::new();

        match self.store.create_task(&self.draft).await {
            Ok(task) => {
                self.tasks.insert(0, task);
                self.reset_and_close_modal();
            }
            Err(e) => {
                if let Some(errors) = e.validation_errors() {
                    self.validation_errors = errors.clone();
                } else {
                    tracing::error!(error = %e, "task creation failed");
                    self.error = Some(banner_message(&e, CREATE_FAILED));
                }
            }
        }
        self.is_loading = false;
    }

    /// Toggles a task's completion status optimistically.
    ///
    /// The cached flag flips before the request goes out. On success the
    /// cached entry is replaced with the server-returned entity, so a
    /// server-side value that differs from the optimistic flip still wins.
    /// On failure the snapshot is restored and the error banner is set. An
    /// id absent from the cache is a no-op and sends nothing.
    pub async fn toggle(&mut self, id: TaskId) {
        let Some(previous) = self.flip(id) else {
            tracing::debug!(%id, "toggle for unknown task ignored");
            return;
        };

        match self.store.toggle_task(id).await {
            Ok(server_task) => {
                if let Some(task) = self.task_mut(id) {
                    *task = server_task;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, %id, "toggle failed, reverting");
                if let Some(task) = self.task_mut(id) {
                    task.is_done = previous;
                }
                self.error = Some(banner_message(&e, TOGGLE_FAILED));
            }
        }
    }

    /// Opens the create-task surface with a clean error state.
    pub fn open_modal(&mut self) {
        self.error = None;
        self.validation_errors = FieldErrors::new();
        self.surface.show();
    }

    /// Hides the surface and resets the form.
    pub fn reset_and_close_modal(&mut self) {
        self.surface.hide();
        self.reset_and_clear_form();
    }

    /// Resets the draft and clears all error state.
    ///
    /// Also the hook for the surface's own dismissal event.
    pub fn reset_and_clear_form(&mut self) {
        self.draft.clear();
        self.validation_errors = FieldErrors::new();
        self.error = None;
    }

    /// Clears the global error banner.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Keywords currently selected in the draft, in `available_keywords`
    /// order, for a multi-select control.
    #[must_use]
    pub fn selected_keywords(&self) -> Vec<&Keyword> {
        self.available_keywords
            .iter()
            .filter(|k| self.draft.keyword_ids.contains(&k.id))
            .collect()
    }

    /// Replaces the draft's keyword ids with the ids of `selection`,
    /// preserving the given order. An empty selection clears them.
    pub fn set_selected_keywords(&mut self, selection: &[Keyword]) {
        self.draft.keyword_ids = selection.iter().map(|k| k.id).collect();
    }

    /// The cached task list, newest-created first.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The keyword reference data.
    #[must_use]
    pub fn available_keywords(&self) -> &[Keyword] {
        &self.available_keywords
    }

    /// The current create-form draft.
    #[must_use]
    pub const fn draft(&self) -> &NewTask {
        &self.draft
    }

    /// Mutable access to the draft for form binding.
    pub const fn draft_mut(&mut self) -> &mut NewTask {
        &mut self.draft
    }

    /// Whether a load or create operation is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The current global error banner, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Field-level validation errors from the last create attempt.
    #[must_use]
    pub const fn validation_errors(&self) -> &FieldErrors {
        &self.validation_errors
    }

    /// Flips `is_done` in the cache, returning the prior value, or `None`
    /// if the id is not cached.
    fn flip(&mut self, id: TaskId) -> Option<bool> {
        let task = self.task_mut(id)?;
        let previous = task.is_done;
        task.is_done = !previous;
        Some(previous)
    }

    fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }
}

/// User-facing message for a failed operation: the server's own message if
/// it sent one, otherwise the operation's generic fallback.
fn banner_message(error: &StoreError, fallback: &str) -> String {
    error
        .server_message()
        .map_or_else(|| fallback.to_string(), str::to_string)
}
