//! The `Task` record and its create/patch payloads.

use serde::{Deserialize, Serialize};

/// Get the current UTC timestamp as an ISO 8601 string.
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// A task record as managed by the store.
///
/// Wire field names follow the external JSON contract; `fecha_actualizacion`
/// is absent until the first full or partial update.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique, monotonically assigned identifier. Never reused.
    pub id: u64,
    /// Title, at least 3 characters after any successful create/update.
    #[serde(rename = "titulo")]
    pub title: String,
    /// Free-form description, may be empty.
    #[serde(rename = "descripcion")]
    pub description: String,
    /// Completion flag.
    #[serde(rename = "completada")]
    pub completed: bool,
    /// ISO 8601 creation timestamp, set once.
    #[serde(rename = "fechaCreacion")]
    pub created_at: String,
    /// ISO 8601 timestamp of the last update, if any.
    #[serde(rename = "fechaActualizacion", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Normalized body for create and full-replace operations.
///
/// Produced by [`crate::validate::validate_create`]; `description` and
/// `completed` keep their wire-level absence so the store can apply defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskPayload {
    /// Required title.
    pub title: String,
    /// Description, `None` when omitted (store defaults to `""`).
    pub description: Option<String>,
    /// Completion flag, `None` when omitted (store defaults to `false`).
    pub completed: Option<bool>,
}

/// Normalized body for partial updates.
///
/// Each field is `Some` only when it was present in the request body, so an
/// explicit `false` or empty string still applies.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskPatch {
    /// New title, when present.
    pub title: Option<String>,
    /// New description, when present.
    pub description: Option<String>,
    /// New completion flag, when present.
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Whether no field is present.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }

    /// Wire names of the fields present in this patch.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.title.is_some() {
            names.push("titulo");
        }
        if self.description.is_some() {
            names.push("descripcion");
        }
        if self.completed.is_some() {
            names.push("completada");
        }
        names
    }
}
