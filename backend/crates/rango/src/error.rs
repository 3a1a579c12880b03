//! Rango Error Types
//!
//! Directory-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Rango-specific result type alias
pub type RangoResult<T> = Result<T, RangoError>;

#[derive(Debug, Error)]
pub enum RangoError {
    /// Name or derived slug already used by another category
    #[error("Category with this Name already exists.")]
    CategoryExists,

    /// Request body could not be read as a form
    #[error("Malformed form submission: {0}")]
    MalformedForm(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RangoError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RangoError::CategoryExists => StatusCode::CONFLICT,
            RangoError::MalformedForm(_) => StatusCode::BAD_REQUEST,
            RangoError::Auth(e) => e.status_code(),
            RangoError::Database(_) | RangoError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RangoError::CategoryExists => ErrorKind::Conflict,
            RangoError::MalformedForm(_) => ErrorKind::BadRequest,
            RangoError::Auth(e) => e.kind(),
            RangoError::Database(_) | RangoError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            // Never show SQL details to visitors
            RangoError::Database(_) | RangoError::Internal(_) => {
                AppError::internal("Something went wrong. Please try again later.")
            }
            RangoError::Auth(e) => e.to_app_error(),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            RangoError::Database(e) => {
                tracing::error!(error = %e, "Rango database error");
            }
            RangoError::Internal(msg) => {
                tracing::error!(message = %msg, "Rango internal error");
            }
            RangoError::MalformedForm(msg) => {
                tracing::warn!(reason = %msg, "Rejected form body");
            }
            _ => {
                tracing::debug!(error = %self, "Rango error");
            }
        }
    }
}

impl IntoResponse for RangoError {
    fn into_response(self) -> Response {
        match self {
            // AuthError logs itself
            RangoError::Auth(e) => e.into_response(),
            other => {
                other.log();
                other.to_app_error().into_response()
            }
        }
    }
}

impl From<AppError> for RangoError {
    fn from(err: AppError) -> Self {
        RangoError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(RangoError::CategoryExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            RangoError::MalformedForm("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RangoError::Auth(AuthError::UserNameTaken).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            RangoError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_status_matches_kind() {
        for err in [
            RangoError::CategoryExists,
            RangoError::MalformedForm("bad".into()),
            RangoError::Auth(AuthError::InvalidCredentials),
            RangoError::Internal("boom".into()),
        ] {
            assert_eq!(err.status_code().as_u16(), err.kind().status_code());
        }
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let app = RangoError::Internal("pool exhausted on host db-1".into()).to_app_error();
        assert!(!app.message().contains("db-1"));
    }
}
