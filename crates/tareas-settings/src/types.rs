//! Settings types and compiled defaults.

use serde::{Deserialize, Serialize};

/// Top-level settings for the task API.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// HTTP server settings.
    pub server: ServerSettings,
    /// Audit log settings.
    pub audit: AuditSettings,
}

/// HTTP server settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Host to bind (default `"127.0.0.1"`).
    pub host: String,
    /// Port to bind (default `3000`).
    pub port: u16,
    /// Development mode: internal error messages are returned verbatim
    /// instead of redacted.
    pub dev_mode: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
            dev_mode: false,
        }
    }
}

/// Audit log settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditSettings {
    /// Path of the append-only request log, relative to the working
    /// directory unless absolute.
    pub log_path: String,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            log_path: "logs/api.log".into(),
        }
    }
}
