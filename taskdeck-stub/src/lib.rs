//! Taskdeck API stub server.
//!
//! An in-memory axum implementation of the task REST contract, used by
//! integration tests and runnable standalone for manual client testing.
//! Implements `GET /api/tasks`, `GET /api/keywords`, `POST /api/tasks`
//! (422 with a `{message, errors}` body on validation failure), and
//! `PATCH /api/tasks/{id}/toggle`.

pub mod server;
pub mod store;
