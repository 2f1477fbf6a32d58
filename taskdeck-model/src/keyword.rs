//! Keyword reference data.
//!
//! Keywords are read-only tags fetched once from the API and attached to
//! tasks by id. This client never mutates them.

use serde::{Deserialize, Serialize};

/// Server-assigned keyword identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct KeywordId(u64);

impl KeywordId {
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

impl From<u64> for KeywordId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for KeywordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A keyword tag as returned by `GET /keywords`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    /// Server-assigned identifier.
    pub id: KeywordId,
    /// Display name.
    pub name: String,
}

impl Keyword {
    /// Convenience constructor.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: KeywordId::new(id),
            name: name.into(),
        }
    }
}
