//! Error types for HTTP transport.

use thiserror::Error;

/// Error type for a single HTTP exchange.
///
/// Only covers failures where no response was obtained. A response with a
/// non-success status is still an `Ok(HttpResponse)`; interpreting it is up
/// to the caller.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed (DNS, refused, reset, TLS, body read).
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The configured client timeout elapsed.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built from the given URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
