//! # tareas-audit
//!
//! Append-only audit log. Every handled request produces one line of the form
//! `[ISO-8601 timestamp] METHOD PATH - STATUS | MESSAGE` in a persistent
//! file, created lazily on first write.
//!
//! Logging is strictly best-effort: the append runs off the request path and
//! write failures are reported to the `tracing` diagnostic channel, never to
//! the caller.

#![deny(unsafe_code)]

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::warn;

/// Append-only sink for request audit lines.
#[derive(Clone, Debug)]
pub struct AuditLog {
    path: Arc<PathBuf>,
}

impl AuditLog {
    /// Create an audit log writing to `path`. The file and its parent
    /// directory are created on first write, not here.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    /// Path of the underlying log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record one handled request, fire-and-forget.
    ///
    /// The append happens on the blocking pool; failures are traced and
    /// swallowed so a broken sink can never fail a request.
    pub fn log(&self, method: &str, path: &str, status: u16, message: &str) {
        let line = format_line(&now_iso(), method, path, status, message);
        let target = Arc::clone(&self.path);
        drop(tokio::task::spawn_blocking(move || {
            if let Err(err) = append_line(&target, &line) {
                warn!(path = %target.display(), %err, "audit log write failed");
            }
        }));
    }

}

/// Current UTC timestamp as ISO 8601.
fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Format a single audit line, newline-terminated.
fn format_line(timestamp: &str, method: &str, path: &str, status: u16, message: &str) -> String {
    format!("[{timestamp}] {method} {path} - {status} | {message}\n")
}

/// Append one line, creating the parent directory and file as needed.
fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())
}
