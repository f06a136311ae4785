//! Service-level validation errors.

use kiosk_core::error::KioskError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("email {0} is already registered")]
    EmailTaken(String),

    #[error("an order needs at least one product")]
    EmptyOrder,

    #[error("unknown order status: {0}")]
    UnknownStatus(String),

    #[error("order cannot move from {from} to {to}")]
    IllegalTransition { from: String, to: String },
}

impl From<ServiceError> for KioskError {
    fn from(err: ServiceError) -> Self {
        KioskError::InvalidArgument {
            message: err.to_string(),
        }
    }
}

/// Reject empty or whitespace-only required fields.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        Err(ServiceError::MissingField(field))
    } else {
        Ok(())
    }
}
