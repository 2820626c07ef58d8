//! Transfer error types.
//!
//! These errors are designed to be serializable and not depend on external
//! error types like `std::io::Error` or `reqwest::Error`. For I/O errors, we
//! capture the kind and message as strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for download operations.
///
/// Designed to be serializable across process boundaries (IPC bridges, CLI)
/// so a latched error can be handed to a polling caller as-is.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum DownloadError {
    /// Local filesystem error while opening, writing or flushing the destination.
    #[error("I/O error ({kind}): {message}")]
    Io {
        /// The kind of I/O error (e.g., `NotFound`, `PermissionDenied`).
        kind: String,
        /// Detailed error message.
        message: String,
    },

    /// Network/HTTP error surfaced by the transport.
    #[error("Network error: {message}")]
    Network {
        /// Detailed error message.
        message: String,
        /// HTTP status code if available.
        #[serde(skip_serializing_if = "Option::is_none")]
        status_code: Option<u16>,
    },

    /// The response did not declare a usable content length.
    #[error("Invalid content-length")]
    InvalidContentLength {
        /// The raw header value, if one was present.
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },

    /// The request itself was malformed (e.g., empty URL).
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Detailed error message.
        message: String,
    },

    /// A download with the same token is already being tracked.
    #[error("Already tracked: {token}")]
    AlreadyTracked {
        /// The token that is already registered.
        token: String,
    },

    /// General/uncategorized error.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl DownloadError {
    /// Create an I/O error from kind and message strings.
    pub fn io(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error from a `std::io::Error`.
    ///
    /// This captures the error kind name and message for serialization.
    #[must_use]
    pub fn from_io_error(err: &std::io::Error) -> Self {
        let kind = err.kind();
        Self::Io {
            kind: format!("{kind:?}"),
            message: err.to_string(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            status_code: None,
        }
    }

    /// Create a network error with HTTP status code.
    pub fn network_with_status(message: impl Into<String>, status_code: u16) -> Self {
        Self::Network {
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Create an invalid content-length error from the raw header value.
    #[must_use]
    pub const fn invalid_content_length(value: Option<String>) -> Self {
        Self::InvalidContentLength { value }
    }

    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create an already tracked error.
    pub fn already_tracked(token: impl Into<String>) -> Self {
        Self::AlreadyTracked {
            token: token.into(),
        }
    }

    /// Create a generic error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Short machine-readable name of the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io",
            Self::Network { .. } => "network",
            Self::InvalidContentLength { .. } => "invalid_content_length",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::AlreadyTracked { .. } => "already_tracked",
            Self::Other { .. } => "other",
        }
    }

    /// Convert to a user-friendly message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io { message, .. } => format!("Could not write the destination file: {message}"),
            Self::Network {
                message,
                status_code: Some(code),
            } => {
                format!("Network error (HTTP {code}): {message}")
            }
            Self::Network { message, .. } => format!("Network error: {message}"),
            Self::InvalidContentLength { value: Some(v) } => {
                format!("The server reported an invalid size ('{v}').")
            }
            Self::InvalidContentLength { value: None } => {
                "The server did not report the file size.".to_string()
            }
            Self::InvalidRequest { message } => format!("Invalid download request: {message}"),
            Self::AlreadyTracked { token } => {
                format!("A download tracked as '{token}' is already registered.")
            }
            Self::Other { message } => message.clone(),
        }
    }
}

impl From<std::io::Error> for DownloadError {
    fn from(err: std::io::Error) -> Self {
        Self::from_io_error(&err)
    }
}

/// Convenience result type for download operations.
pub type DownloadResult<T> = Result<T, DownloadError>;
