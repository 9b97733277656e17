//! Application error type and its HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::utils::short_code::InvalidShortCode;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Forbidden { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Forbidden { message, details } => ("forbidden", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal { message, .. } = &self {
            tracing::error!(message = %message, "Request failed with internal error");
        }

        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

/// A code that does not decode names no URL, so it maps to 404.
impl From<InvalidShortCode> for AppError {
    fn from(e: InvalidShortCode) -> Self {
        AppError::not_found("URL not found", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_default();
        AppError::bad_request("Validation failed", details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("x", json!({})).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::forbidden("x", json!({})).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::internal("x", json!({})).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_short_code_is_not_found() {
        let err: AppError = crate::utils::short_code::decode("A!B").unwrap_err().into();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_error_info().code, "not_found");
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::forbidden("You are not authorized to delete this URL", json!({}));
        assert_eq!(err.to_string(), "You are not authorized to delete this URL");
    }
}
