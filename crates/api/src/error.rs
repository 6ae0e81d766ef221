//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that renders the failure envelope and
//! captures unexpected errors to Sentry. All route handlers return
//! `Result<T, AppError>`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use shopline_core::PageError;

use crate::db::RepositoryError;
use crate::models::{Envelope, ValidationErrors};

/// Message shown to clients for unexpected failures.
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";

/// Message shown when a shop id does not exist.
pub const DATA_NOT_FOUND: &str = "Data not found";

/// Application-level error type for the shop API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Client-supplied data broke a validation rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The database rejected a statement.
    #[error("Database error: {0}")]
    Database(String),

    /// Requested entity or page does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Anything else.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Database(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the envelope.
    #[must_use]
    pub fn client_message(&self) -> &str {
        match self {
            Self::Validation(msg) | Self::Database(msg) | Self::NotFound(msg) => msg,
            // Don't expose internal error details to clients
            Self::Unexpected(_) => UNEXPECTED_MESSAGE,
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Database(sqlx::Error::Database(db_err)) => {
                Self::Database(db_err.message().to_owned())
            }
            RepositoryError::Database(e) => Self::Unexpected(e.to_string()),
            RepositoryError::DataCorruption(msg) => Self::Unexpected(msg),
            RepositoryError::NotFound => Self::NotFound(DATA_NOT_FOUND.to_owned()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<PageError> for AppError {
    fn from(err: PageError) -> Self {
        match err {
            PageError::NotPositive { .. } => Self::Validation(err.to_string()),
            PageError::OutOfRange { .. } => Self::NotFound(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::Unexpected(_) => {
                let event_id = sentry::capture_error(&self);
                tracing::error!(
                    error = %self,
                    sentry_event_id = %event_id,
                    "Request error"
                );
            }
            Self::Database(_) => tracing::warn!(error = %self, "Database rejected request"),
            Self::Validation(_) | Self::NotFound(_) => {
                tracing::debug!(error = %self, "Request failed");
            }
        }

        let body = Envelope::<()>::failure(self.client_message());
        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Page not found".to_string());
        assert_eq!(err.to_string(), "Not found: Page not found");

        let err = AppError::Validation("name is required".to_string());
        assert_eq!(err.to_string(), "Validation error: name is required");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::Validation("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Database("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unexpected("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unexpected_hides_details() {
        let err = AppError::Unexpected("pool timed out".to_string());
        assert_eq!(err.client_message(), UNEXPECTED_MESSAGE);
    }

    #[test]
    fn test_repository_error_mapping() {
        let err = AppError::from(RepositoryError::NotFound);
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == DATA_NOT_FOUND));

        let err = AppError::from(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        assert!(matches!(err, AppError::Unexpected(_)));

        let err = AppError::from(RepositoryError::DataCorruption("bad email".to_string()));
        assert!(matches!(err, AppError::Unexpected(_)));
    }

    #[test]
    fn test_page_error_mapping() {
        let err = AppError::from(PageError::OutOfRange {
            page: 9,
            total_page: 2,
        });
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Page not found"));

        let err = AppError::from(PageError::NotPositive { param: "limit" });
        assert!(matches!(err, AppError::Validation(ref msg) if msg == "limit must be a positive integer"));
    }
}
