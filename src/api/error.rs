//! Unified API error handling.
//!
//! All failures are returned as JSON with a human-readable `message` field
//! and a machine-readable `code`, with the HTTP status derived from the
//! code. Validation failures, missing sessions, upstream photo API
//! failures, and unexpected errors all flow through this one type.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::photos::PhotoError;

/// Error codes for API responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Client errors (4xx)
    MissingFields,
    WeakPassword,
    InvalidJson,
    ValidationError,
    Unauthorized,
    NotFound,
    RateLimited,

    // Server errors (5xx)
    InternalError,
    ServiceUnavailable,
    UpstreamError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::MissingFields => StatusCode::BAD_REQUEST,
            ErrorCode::WeakPassword => StatusCode::BAD_REQUEST,
            ErrorCode::InvalidJson => StatusCode::BAD_REQUEST,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::UpstreamError => StatusCode::BAD_GATEWAY,
        }
    }

    /// Get the string representation of the error code
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingFields => "missing_fields",
            ErrorCode::WeakPassword => "weak_password",
            ErrorCode::InvalidJson => "invalid_json",
            ErrorCode::ValidationError => "validation_error",
            ErrorCode::Unauthorized => "unauthorized",
            ErrorCode::NotFound => "not_found",
            ErrorCode::RateLimited => "rate_limited",
            ErrorCode::InternalError => "internal_error",
            ErrorCode::ServiceUnavailable => "service_unavailable",
            ErrorCode::UpstreamError => "upstream_error",
        }
    }
}

/// The JSON error body. `message` comes first; clients key off it for
/// inline form errors, `code` exists for programmatic handling.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: String,
}

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn status(&self) -> StatusCode {
        self.code.status_code()
    }

    // -------------------------------------------------------------------------
    // Convenience constructors for common error types
    // -------------------------------------------------------------------------

    /// Required request fields are empty or absent (400)
    pub fn missing_fields(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingFields, message)
    }

    /// Password fails the minimum-length rule (400)
    pub fn weak_password(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::WeakPassword, message)
    }

    /// Request body was not valid JSON (400)
    pub fn invalid_json() -> Self {
        Self::new(ErrorCode::InvalidJson, "Invalid JSON in request body")
    }

    /// Input is well-formed but fails a business rule (400)
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// No session found (401)
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Resource does not exist (404)
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Unexpected failure (500); internals are logged, not leaked
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Dependency is not configured or not reachable (503)
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.message,
            code: self.code.as_str().to_string(),
        };
        (self.code.status_code(), Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

// -------------------------------------------------------------------------
// Conversion implementations
// -------------------------------------------------------------------------

impl From<PhotoError> for ApiError {
    fn from(err: PhotoError) -> Self {
        tracing::warn!("Photo upstream error: {}", err);

        match err {
            PhotoError::MissingApiKey => {
                ApiError::service_unavailable("Photo API key is not configured")
            }
            PhotoError::RateLimited => {
                ApiError::new(ErrorCode::RateLimited, "Photo API rate limit exceeded")
            }
            PhotoError::NotFound => ApiError::not_found("Image not found"),
            PhotoError::InvalidParameters(message) => ApiError::validation(message),
            PhotoError::InvalidApiKey => {
                ApiError::new(ErrorCode::UpstreamError, "Photo API rejected the API key")
            }
            PhotoError::Network(_) => {
                ApiError::new(ErrorCode::UpstreamError, "Failed to reach the photo API")
            }
            PhotoError::Api { .. } => {
                ApiError::new(ErrorCode::UpstreamError, "Photo API request failed")
            }
        }
    }
}
