//! Service error types with HTTP status code mapping.
//!
//! [`AnalyticsError`] is the central error type. Each variant maps to a
//! specific HTTP status code and structured JSON error response. The pure
//! analyzers never produce one; errors come from request validation,
//! session handling and the upstream boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "topic not found: staking",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status               |
/// |-----------|-----------------|---------------------------|
/// | 1000–1099 | Validation      | 400 Bad Request           |
/// | 1100–1199 | Session         | 401 Unauthorized          |
/// | 2000–2999 | Not Found       | 404 Not Found             |
/// | 3000      | Server          | 500 Internal Server Error |
/// | 3001–3099 | Upstream        | 502 Bad Gateway           |
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Unsupported tree grouping mode.
    #[error("invalid group mode: {0}")]
    InvalidGroupMode(String),

    /// No usable bearer credential was supplied.
    #[error("missing session: {0}")]
    MissingSession(String),

    /// The supplied session has expired.
    #[error("session expired")]
    SessionExpired,

    /// No message carries the requested topic label.
    #[error("topic not found: {0}")]
    TopicNotFound(String),

    /// Upstream request failed or returned a non-success status.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Upstream body could not be decoded.
    #[error("upstream payload error: {0}")]
    UpstreamPayload(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AnalyticsError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidGroupMode(_) => 1002,
            Self::MissingSession(_) => 1101,
            Self::SessionExpired => 1102,
            Self::TopicNotFound(_) => 2001,
            Self::Internal(_) => 3000,
            Self::Upstream(_) => 3001,
            Self::UpstreamPayload(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidGroupMode(_) => StatusCode::BAD_REQUEST,
            Self::MissingSession(_) | Self::SessionExpired => StatusCode::UNAUTHORIZED,
            Self::TopicNotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) | Self::UpstreamPayload(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for AnalyticsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::UpstreamPayload(err.to_string())
        } else {
            Self::Upstream(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AnalyticsError {
    fn from(err: serde_json::Error) -> Self {
        Self::UpstreamPayload(err.to_string())
    }
}

impl IntoResponse for AnalyticsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
