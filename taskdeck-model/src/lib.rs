//! Shared data model for the taskdeck REST API.
//!
//! Defines the entities exchanged with the remote task service (tasks and
//! keywords), the draft type for a not-yet-created task, the validation
//! error body shape returned on HTTP 422, and the pure due-date
//! classification helper.

pub mod keyword;
pub mod task;
pub mod validation;
