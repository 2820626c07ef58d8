//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings from
//! transfer errors to exit codes and user-facing messages.

use dltrack_core::DownloadError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A transfer failed.
    #[error("{}", .0.user_message())]
    Transfer(#[from] DownloadError),

    /// Argument or manifest content error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error outside of a transfer (reading the manifest, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Some entries of a batch failed.
    #[error("{failed} of {total} downloads failed")]
    Batch {
        /// Number of failed entries.
        failed: usize,
        /// Number of entries in the batch.
        total: usize,
    },
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 74: I/O error (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Transfer(DownloadError::Io { .. }) | Self::Io(_) => 74, // EX_IOERR
            Self::Transfer(DownloadError::InvalidRequest { .. }) | Self::Arguments(_) => 2,
            Self::Transfer(_) | Self::Batch { .. } => 1,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
