//! # tareas-store
//!
//! In-memory task store: exclusive owner of the collection and the id
//! counter. Implements lookup, list with filter/search/sort composition,
//! create, full replace, partial merge, removal, and aggregate stats.

#![deny(unsafe_code)]

pub mod query;
pub mod store;

pub use query::ListQuery;
pub use store::{Stats, TaskStore};
