//! Error-to-response mapping for the HTTP surface.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Redacted 500 message used outside dev mode.
const REDACTED_MESSAGE: &str = "Algo salió mal";

/// Errors a handler can surface to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Caller input failed the schema gate. Always 400 with the full
    /// violation list; the store was never touched.
    #[error("Datos de entrada inválidos")]
    Validation {
        /// All collected violation messages.
        detalles: Vec<String>,
    },

    /// Request body was not parsable JSON. Handled before any handler logic.
    #[error("JSON inválido")]
    BadJson,

    /// Referenced task id absent (or not numeric).
    #[error("Tarea no encontrada")]
    NotFound,

    /// Unexpected internal error. Redacted outside dev mode.
    #[error("Error interno del servidor")]
    Internal {
        /// Raw error description.
        message: String,
        /// Whether the raw message may be returned to the caller.
        dev_mode: bool,
    },
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::BadJson => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation { detalles } => json!({
                "error": self.to_string(),
                "detalles": detalles,
            }),
            Self::BadJson | Self::NotFound => json!({ "error": self.to_string() }),
            Self::Internal { message, dev_mode } => json!({
                "error": self.to_string(),
                "mensaje": if *dev_mode { message.as_str() } else { REDACTED_MESSAGE },
            }),
        };
        (status, Json(body)).into_response()
    }
}
