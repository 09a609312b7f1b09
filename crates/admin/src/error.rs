//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding with the JSON envelope. All route handlers return
//! `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use dala_core::ApiResponse;

use crate::supabase::SupabaseError;
use crate::validate::FieldErrors;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Supabase backend operation failed.
    #[error("Backend error: {0}")]
    Backend(SupabaseError),

    /// Request input failed validation.
    #[error("Validation error")]
    Validation(FieldErrors),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Malformed multipart payload.
    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SupabaseError> for AppError {
    fn from(err: SupabaseError) -> Self {
        // Absent rows are a dedicated UI state, not a backend failure
        match err {
            SupabaseError::NotFound(what) => Self::NotFound(what),
            other => Self::Backend(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Backend(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Backend(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) | Self::BadRequest(_) | Self::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Don't expose internal error details to clients
        let body: ApiResponse<()> = match self {
            Self::Validation(errors) => ApiResponse::validation(errors),
            Self::Backend(_) => ApiResponse::err("External service error"),
            Self::Internal(_) => ApiResponse::err("Internal server error"),
            Self::NotFound(what) => ApiResponse::err(what),
            Self::BadRequest(message) => ApiResponse::err(message),
            Self::Multipart(e) => ApiResponse::err(format!("Malformed form data: {e}")),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
