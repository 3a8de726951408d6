//! Custom error types for the API service
//!
//! Every handler converts internal failures into one of these variants at its
//! boundary. Response bodies carry a generic, non-leaking message; the detail
//! goes to the server-side log.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or missing required input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Bad credentials or missing/invalid session
    #[error("Unauthorized")]
    Unauthorized,

    /// Duplicate unique identity
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Client exceeded the rate limit
    #[error("Too many requests")]
    TooManyRequests,

    /// External completion service failure
    #[error("Upstream completion failure")]
    Upstream,

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests".to_string(),
            ),
            ApiError::Upstream => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to process request".to_string(),
            ),
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            ApiError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
