//! HTTP error handling and response conversion.
//!
//! Domain failures are mapped to structured JSON error responses at the
//! handler boundary. Not-found and authorization failures carry a
//! descriptive message; persistence failures are logged in full but
//! reach the client as a generic message only.

use crate::domain::blog::errors::DomainError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Application-level errors returned from handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found (404). Also covers malformed ids and drafts
    /// requested by non-authors, which are indistinguishable from
    /// missing resources on purpose.
    NotFound(String),

    /// Request shape rejected (400).
    BadRequest(String),

    /// No authenticated identity where one is required (401).
    Unauthenticated,

    /// Authenticated, but not the actor this operation requires (401).
    Unauthorized(String),

    /// Request data failed validation (400).
    ValidationError(String),

    /// Database operation failed (500).
    Database(String),

    /// Unclassified internal error (500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthenticated => write!(f, "Authentication required"),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::Database(msg) => write!(f, "Database error: {}", msg),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated | Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-safe error message, free of implementation detail.
    fn user_message(&self) -> String {
        match self {
            Self::NotFound(msg) => msg.clone(),
            Self::BadRequest(msg) => msg.clone(),
            Self::Unauthenticated => "Authentication required".into(),
            Self::Unauthorized(msg) => msg.clone(),
            Self::ValidationError(msg) => msg.clone(),
            Self::Database(_) => "Server error".into(),
            Self::Internal(_) => "Server error".into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        match status {
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("error={}", self);
            }
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => {
                tracing::warn!("error={}", self);
            }
            _ => {
                tracing::info!("error={}", self);
            }
        }

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(what) => AppError::NotFound(format!("{} not found", what)),
            DomainError::Unauthenticated => AppError::Unauthenticated,
            DomainError::Unauthorized => AppError::Unauthorized("User not authorized".into()),
            DomainError::ValidationError(msg) => AppError::ValidationError(msg),
            DomainError::InfrastructureError(msg) => {
                tracing::error!(infrastructure_error = %msg);
                AppError::Internal(msg)
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::PoolTimedOut => {
                tracing::warn!("Database connection pool exhausted, timing out");
                AppError::Database("Connection pool exhausted".into())
            }
            sqlx::Error::PoolClosed => {
                tracing::error!("Database connection pool closed");
                AppError::Database("Database connection unavailable".into())
            }
            _ => {
                tracing::error!(database_error = %err);
                AppError::Database("Database error".into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_error_kinds() {
        assert_eq!(
            AppError::NotFound("Blog not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Unauthorized("User not authorized".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Database("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_errors_never_leak_detail() {
        let err = AppError::Database("connection refused on 10.0.0.3".into());
        assert_eq!(err.user_message(), "Server error");
    }

    #[test]
    fn domain_unauthorized_maps_to_401() {
        let err: AppError = DomainError::Unauthorized.into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn domain_not_found_carries_the_subject() {
        let err: AppError = DomainError::NotFound("Comment".into()).into();
        assert_eq!(err.user_message(), "Comment not found");
    }
}
