//! Error types and HTTP error response handling.
//!
//! This module defines the startup-time configuration errors and the
//! per-request errors, and how the latter are converted into HTTP responses
//! with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Startup-time configuration error.
///
/// Raised once while loading configuration or constructing the gate; fatal,
/// and prevents the middleware from being installed. Never produced on the
/// per-request path.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The shared verification secret is required and must be non-empty.
    #[error("turnstile secret cannot be empty")]
    EmptySecret,

    /// Environment variables are missing or cannot be parsed.
    #[error("invalid environment configuration: {0}")]
    Env(#[from] envy::Error),

    /// The `PROTECTED_ROUTES` value is not a valid JSON rule list.
    #[error("invalid protected route list: {0}")]
    Routes(#[from] serde_json::Error),

    /// The verification endpoint is not a valid URL.
    #[error("invalid verification endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// The outbound HTTP client could not be built.
    #[error("failed to build verification client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Per-request error raised by the gate.
///
/// Splits into two classes: client errors (the request itself is at fault,
/// HTTP 400) and infrastructure errors (copying the request or talking to
/// the verification endpoint failed, HTTP 500). In every case the request is
/// never forwarded downstream.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The form body carried no (or an empty) token under the configured key.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("no token provided")]
    MissingToken,

    /// The form body could not be decoded.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("failed to parse form")]
    MalformedForm,

    /// The provider evaluated the token and rejected it.
    ///
    /// Carries the provider-supplied error codes, joined into the message.
    /// Returns HTTP 400 Bad Request.
    #[error("verification failed: {}", .0.join(", "))]
    VerificationRejected(Vec<String>),

    /// Reading the request body while duplicating it failed.
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("failed to copy request")]
    CopyRequest(#[source] axum::Error),

    /// The verification endpoint could not be reached.
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("failed to verify token")]
    VerifyTransport(#[source] reqwest::Error),

    /// The verification response body could not be read.
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("failed to read verification response")]
    VerifyRead(#[source] reqwest::Error),

    /// The verification response body was not the expected JSON shape.
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("failed to parse verification response")]
    VerifyDecode(#[source] serde_json::Error),
}

impl AppError {
    /// HTTP status this error surfaces as.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingToken
            | AppError::MalformedForm
            | AppError::VerificationRejected(_) => StatusCode::BAD_REQUEST,
            AppError::CopyRequest(_)
            | AppError::VerifyTransport(_)
            | AppError::VerifyRead(_)
            | AppError::VerifyDecode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// All errors return JSON in this format:
/// ```json
/// {"error": "Human-readable error message"}
/// ```
///
/// Client errors map to 400 Bad Request, infrastructure errors to 500
/// Internal Server Error. Infrastructure errors are logged with their source
/// before the response is built; the source never reaches the client.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, source = ?std::error::Error::source(&self), "gate infrastructure failure");
        }

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}
