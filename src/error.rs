//! Error types for the onboarding service.
//!
//! Every failure in the crate is an [`Error`]. Handlers decide which HTTP
//! status a failure maps to and turn it into a [`Failure`] response.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::structs::api::ErrorBody;

/// The main error type for onboarding operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Startup Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] config::ConfigError),

    /// No MongoDB connection string was supplied.
    #[error("missing MONGO_URI; add it to the environment or .env and restart")]
    MissingMongoUri,

    /// The tracing subscriber could not be installed.
    #[error("failed to install tracing subscriber: {0}")]
    Telemetry(#[from] tracing::subscriber::SetGlobalDefaultError),

    // === Store Errors ===
    /// A MongoDB operation failed.
    #[error("{0}")]
    Database(#[from] mongodb::error::Error),

    // === Request Errors ===
    /// The request body could not be read as multipart form data.
    #[error("{0}")]
    BadRequest(String),

    /// A multipart part could not be decoded.
    #[error("{0}")]
    Multipart(#[from] MultipartError),

    /// A file arrived under a field that has no document slot, or the slot was already filled.
    #[error("Unexpected field: {field}")]
    UnexpectedFile {
        /// Name of the offending form field.
        field: String,
    },

    /// An enumerated field held a value outside its set.
    #[error(
        "Employee validation failed: {path}: `{value}` is not a valid enum value for path `{path}`."
    )]
    InvalidEnumValue {
        /// Dotted path of the field inside the record.
        path: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The previous experience list was not a JSON array of entries.
    #[error("Employee validation failed: previousExperience: {0}")]
    InvalidExperience(#[source] serde_json::Error),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for onboarding operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error was raised by validation, before anything touched the store.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidEnumValue { .. } | Self::InvalidExperience(_)
        )
    }

    /// Pair the error with the status code the calling handler responds with.
    #[must_use]
    pub fn with_status(self, status: StatusCode) -> Failure {
        Failure {
            status,
            error: self,
        }
    }
}

/// An error on its way out as an HTTP response: `{ "ok": false, "error": "<message>" }`.
#[derive(Debug)]
pub struct Failure {
    pub status: StatusCode,
    pub error: Error,
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(error = %self.error, status = %self.status, "request failed");
        } else {
            tracing::warn!(error = %self.error, status = %self.status, "request rejected");
        }

        (
            self.status,
            Json(ErrorBody {
                ok: false,
                error: self.error.to_string(),
            }),
        )
            .into_response()
    }
}
