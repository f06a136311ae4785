//! Database-specific error types and conversions.

use kiosk_core::error::KioskError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Failed to decode {entity} document: {reason}")]
    Decode { entity: String, reason: String },

    #[error("Malformed {entity} id: {id}")]
    InvalidId { entity: String, id: String },

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl DbError {
    pub(crate) fn decode(entity: &str, reason: impl ToString) -> Self {
        Self::Decode {
            entity: entity.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn not_found(entity: &str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Whether the store reported a write conflict that may succeed if the
    /// statement is re-run.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Surreal(e) => e.to_string().contains("can be retried"),
            _ => false,
        }
    }
}

impl From<DbError> for KioskError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => KioskError::NotFound { entity, id },
            DbError::InvalidId { entity, id } => KioskError::InvalidArgument {
                message: format!("malformed {entity} id: {id}"),
            },
            other => KioskError::Persistence(other.to_string()),
        }
    }
}
