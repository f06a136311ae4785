//! Error types for the Kiosk system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KioskError {
    /// Malformed identifier or missing required field.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Authentication failed: {reason}")]
    AuthFailed { reason: String },

    /// Store failure, connection loss or rejected write.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl KioskError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Stable, machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::NotFound { .. } => "not_found",
            Self::AuthFailed { .. } => "auth_failed",
            Self::Persistence(_) => "persistence_error",
        }
    }
}

pub type KioskResult<T> = Result<T, KioskError>;
