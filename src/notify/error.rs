//! Error types for notification delivery.

use thiserror::Error;

use crate::transport::HttpError;

/// Why a webhook notification was not delivered.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// No response was obtained.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// The endpoint answered with a non-2xx status.
    #[error("Non-success status {status}{}", body.as_ref().map_or(String::new(), |b| format!(": {b}")))]
    NonSuccessStatus {
        /// HTTP status code returned
        status: http::StatusCode,
        /// Response body, if valid UTF-8
        body: Option<String>,
    },

    /// The body template failed to render.
    #[error("Template rendering failed: {0}")]
    Template(String),

    /// The default JSON body failed to serialize.
    #[error("Failed to serialize body: {0}")]
    Serialize(#[from] serde_json::Error),
}
