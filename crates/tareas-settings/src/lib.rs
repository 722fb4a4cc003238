//! # tareas-settings
//!
//! Configuration for the task API with layered sources: compiled defaults,
//! an optional JSON settings file deep-merged over them, and environment
//! variable overrides on top.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{load_settings, load_settings_from_path, settings_path};
pub use types::Settings;
