//! Error types for lookup operations.

use thiserror::Error;

use crate::transport::HttpError;

/// Why a single lookup request did not produce a usable answer.
#[derive(Debug, Error)]
pub enum LookupFailure {
    /// No response was obtained.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The service answered with a non-2xx status.
    #[error("Service returned status {status}")]
    Status {
        /// HTTP status code returned
        status: http::StatusCode,
        /// Response body, if valid UTF-8
        body: Option<String>,
    },

    /// The response body could not be interpreted.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl LookupFailure {
    /// Returns the HTTP status if the service answered with one.
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(_) | Self::Malformed(_) => None,
        }
    }
}

/// Passes a 2xx response through, or turns it into [`LookupFailure::Status`].
pub(crate) fn ensure_success(
    response: crate::transport::HttpResponse,
) -> Result<crate::transport::HttpResponse, LookupFailure> {
    if response.is_success() {
        return Ok(response);
    }

    Err(LookupFailure::Status {
        status: response.status,
        body: response.body_text().map(ToString::to_string),
    })
}
