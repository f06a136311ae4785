//! HTTP error mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kiosk_core::error::KioskError;
use serde_json::json;
use thiserror::Error;

/// Error returned by every handler.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub KioskError);

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            KioskError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            KioskError::NotFound { .. } => StatusCode::NOT_FOUND,
            KioskError::AuthFailed { .. } => StatusCode::UNAUTHORIZED,
            KioskError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Don't expose store details to clients
        let message = match &self.0 {
            KioskError::Persistence(_) => {
                tracing::error!(error = %self.0, "Request failed on persistence");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": self.0.kind(),
            "message": message,
        }));
        (status, body).into_response()
    }
}
