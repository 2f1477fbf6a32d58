//! Taskdeck client library for a remote task-board REST API.
//!
//! The [`store`] module is the typed transport boundary; the [`list`]
//! module owns the cached UI state and the optimistic-update semantics on
//! top of it.

pub mod config;
pub mod list;
pub mod store;
