//! API error types and responses.
//!
//! This module defines the standard error format for all API responses.
//! Internal failures are logged with their raw cause and surfaced with a
//! generic message only; not-found variants keep distinct message texts so
//! "no record", "no PDF recorded", and "file gone" stay distinguishable.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use znznow_service::ServiceError;

/// API error type that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid request body or parameters.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

/// Error details.
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(id) => Self::NotFound(format!("agreement {id}")),
            ServiceError::PdfNotRecorded(_) => Self::NotFound("PDF not found".to_string()),
            ServiceError::PdfFileMissing(_) => Self::NotFound("PDF file not found".to_string()),
            ServiceError::Render(err) => {
                tracing::error!(error = %err, "document rendering failed");
                Self::Internal("failed to generate PDF".to_string())
            }
            ServiceError::Store(err) => {
                tracing::error!(error = %err, "store error");
                Self::Internal("storage error".to_string())
            }
            ServiceError::Io(err) => {
                tracing::error!(error = %err, "file store error");
                Self::Internal("file store error".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use znznow_core::AgreementId;

    #[test]
    fn error_status_codes() {
        assert_eq!(
            ApiError::NotFound("test".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::BadRequest("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("test".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_codes() {
        assert_eq!(ApiError::NotFound("test".into()).code(), "not_found");
        assert_eq!(ApiError::BadRequest("test".into()).code(), "bad_request");
        assert_eq!(ApiError::Internal("test".into()).code(), "internal_error");
    }

    #[test]
    fn missing_pdf_variants_stay_distinguishable() {
        let id = AgreementId::generate();
        let not_recorded = ApiError::from(ServiceError::PdfNotRecorded(id));
        let file_missing = ApiError::from(ServiceError::PdfFileMissing("/gone.pdf".into()));

        assert_eq!(not_recorded.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(file_missing.status_code(), StatusCode::NOT_FOUND);
        assert_ne!(not_recorded.to_string(), file_missing.to_string());
    }

    #[test]
    fn internal_errors_hide_the_cause() {
        let err = ApiError::from(ServiceError::Io(std::io::Error::other("disk exploded")));
        assert!(!err.to_string().contains("disk exploded"));
    }
}
