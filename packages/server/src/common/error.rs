//! API error taxonomy.
//!
//! Every fallible handler and domain operation returns `ApiError`. The
//! `IntoResponse` impl maps each variant to an HTTP status and a JSON
//! `{"error": ...}` body, so backend error codes (e.g. the unique-violation
//! behind `AlreadyUnlocked`) surface to clients as distinguishable messages.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Admin access required")]
    AdminRequired,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("This e-mail is already registered")]
    EmailTaken,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Insufficient credits")]
    InsufficientCredits,

    #[error("Contact already unlocked")]
    AlreadyUnlocked,

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::AuthenticationRequired | ApiError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::PermissionDenied(_) | ApiError::AdminRequired => StatusCode::FORBIDDEN,
            ApiError::EmailTaken | ApiError::AlreadyUnlocked => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InsufficientCredits => StatusCode::PAYMENT_REQUIRED,
            ApiError::InvalidTransition { .. } | ApiError::Validation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Internal detail stays in the logs, not the response body.
        let message = match &self {
            ApiError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                "Internal server error".to_string()
            }
            ApiError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl ApiError {
    /// Maps a sqlx error to `AlreadyUnlocked` when it is the unique-violation
    /// on (provider_id, request_id), passing other errors through.
    pub fn from_unlock_insert(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return ApiError::AlreadyUnlocked;
            }
        }
        ApiError::Database(err)
    }
}
