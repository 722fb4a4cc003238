//! Server configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the task API server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind (default `"127.0.0.1"`).
    pub host: String,
    /// Port to bind (default `0` for auto-assign).
    pub port: u16,
    /// Development mode: 500 responses carry the raw error message instead
    /// of the redacted one.
    pub dev_mode: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            dev_mode: false,
        }
    }
}
