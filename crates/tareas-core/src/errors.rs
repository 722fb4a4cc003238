//! Error taxonomy shared by the store and the HTTP layer.

/// Errors produced by task operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// Referenced task id does not exist (or the id was not numeric).
    #[error("Tarea no encontrada")]
    NotFound {
        /// The identifier as the caller supplied it.
        id: String,
    },

    /// Caller input failed schema validation.
    #[error("Datos de entrada inválidos")]
    Validation {
        /// All collected violation messages.
        details: Vec<String>,
    },

    /// Unexpected internal error.
    #[error("{message}")]
    Internal {
        /// Raw description, redacted from responses outside dev mode.
        message: String,
    },
}

impl TaskError {
    /// Not-found error for the given raw identifier.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Validation error from collected violation messages.
    pub fn validation(details: Vec<String>) -> Self {
        Self::Validation { details }
    }
}

/// Convenience alias for task operation results.
pub type Result<T> = std::result::Result<T, TaskError>;
