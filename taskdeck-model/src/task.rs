//! Task entity, creation draft, and due-date classification.
//!
//! The server owns every field of [`Task`]; the client holds cached copies
//! and never invents ids or completion state. [`NewTask`] is the transient
//! draft for the create form and doubles as the `POST /tasks` body.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::keyword::KeywordId;

/// Server-assigned task identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Wraps a raw id value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for TaskId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A task as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identifier, immutable once created.
    pub id: TaskId,
    /// Task title, non-empty (enforced server-side).
    pub title: String,
    /// Optional calendar due date.
    #[serde(default)]
    pub limit_date: Option<NaiveDate>,
    /// Completion flag; the server is the sole authority on its value.
    pub is_done: bool,
    /// Ids of the keywords attached to this task.
    #[serde(default)]
    pub keyword_ids: Vec<KeywordId>,
}

impl Task {
    /// Classifies this task's due date against `today`.
    ///
    /// Calendar-day granularity only; [`NaiveDate`] carries no time
    /// component, so there is nothing to zero out. A task without a limit
    /// date has no classification.
    #[must_use]
    pub fn due_status(&self, today: NaiveDate) -> Option<DueStatus> {
        let limit = self.limit_date?;
        Some(if self.is_done {
            DueStatus::Completed
        } else if limit < today {
            DueStatus::Overdue
        } else if limit == today {
            DueStatus::DueToday
        } else {
            DueStatus::Upcoming
        })
    }
}

/// Due-date classification of a task with a limit date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    /// The task is done; the due date no longer matters.
    Completed,
    /// The limit date is strictly before today.
    Overdue,
    /// The limit date is today.
    DueToday,
    /// The limit date is strictly after today.
    Upcoming,
}

impl std::fmt::Display for DueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Overdue => write!(f, "overdue"),
            Self::DueToday => write!(f, "due today"),
            Self::Upcoming => write!(f, "upcoming"),
        }
    }
}

/// Draft for a not-yet-created task.
///
/// Owned by the list controller, reset after a successful submission or a
/// dismissal of the create form. Serializes to the `POST /tasks` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// Title entered by the user.
    pub title: String,
    /// Optional due date.
    #[serde(default)]
    pub limit_date: Option<NaiveDate>,
    /// Selected keyword ids, in selection order.
    #[serde(default)]
    pub keyword_ids: Vec<KeywordId>,
}

impl NewTask {
    /// Resets the draft to its empty state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether the draft holds no user input at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.limit_date.is_none() && self.keyword_ids.is_empty()
    }
}
