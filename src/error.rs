// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::manager::DatabaseError;

/// HTTP API error with a status code and a client-facing message.
/// Every variant renders as `{"error": <message>}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

pub const MISSING_DATA: &str = "Missing data";

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }

    pub fn missing_data() -> Self {
        ApiError::BadRequest(MISSING_DATA.to_string())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    /// Map a store failure onto the response for one operation.
    /// `not_found` is the 404 message; everything else becomes a 500 with
    /// `failure`, and the underlying cause is only logged.
    pub fn from_store(err: DatabaseError, not_found: &str, failure: &str) -> Self {
        match err {
            DatabaseError::NotFound(what) => {
                tracing::debug!("Lookup missed: {}", what);
                ApiError::not_found(not_found)
            }
            DatabaseError::Constraint(msg) => {
                tracing::warn!("{}: constraint violation: {}", failure, msg);
                ApiError::internal_server_error(failure)
            }
            other => {
                tracing::error!("{}: {}", failure, other);
                ApiError::internal_server_error(failure)
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
