//! Internal error types for the HTTP transport.
//!
//! These errors are internal to `dltrack-download` and are mapped to
//! [`DownloadError`] at the port boundary.

use dltrack_core::DownloadError;
use thiserror::Error;

/// Errors raised while talking to an HTTP server.
#[derive(Debug, Error)]
pub(crate) enum HttpError {
    /// The server answered with a non-success status.
    #[error("HTTP {status} for {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// Connection, TLS, timeout or body-read failure.
    #[error("{0}")]
    Client(#[from] reqwest::Error),
}

impl From<HttpError> for DownloadError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Status { status, .. } => Self::network_with_status(err.to_string(), status),
            HttpError::Client(inner) => match inner.status() {
                Some(status) => Self::network_with_status(inner.to_string(), status.as_u16()),
                None => Self::network(inner.to_string()),
            },
        }
    }
}
