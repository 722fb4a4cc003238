//! # tareas-server
//!
//! Axum HTTP surface for the task-list API.
//!
//! - Routes: API description, stats, and the task CRUD endpoints
//! - Handler pipeline: validation gate → store operation → audit log →
//!   JSON response
//! - Error mapping: 400 validation / malformed JSON, 404 not-found with
//!   route suggestions on the fallback, 500 with redaction outside dev mode
//! - Graceful shutdown via `CancellationToken`

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;
pub mod shutdown;

pub use config::ServerConfig;
pub use server::{ApiServer, AppState};
pub use shutdown::ShutdownCoordinator;
