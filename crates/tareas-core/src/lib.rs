//! # tareas-core
//!
//! Domain types and input validation for the task-list API.
//!
//! - [`task::Task`] — the managed record, serialized with the Spanish wire
//!   field names of the external contract
//! - [`errors::TaskError`] — the error taxonomy shared across crates
//! - [`validate`] — the schema gate applied to inbound JSON bodies

#![deny(unsafe_code)]

pub mod errors;
pub mod task;
pub mod validate;

pub use errors::TaskError;
pub use task::{Task, TaskPatch, TaskPayload};
