//! Transfer tracker port definition.
//!
//! This port is what a UI layer or IPC bridge talks to. It hides the
//! transport, sink and registry behind three operations.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::download::{DownloadRecord, DownloadResult};

/// Request to start one download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// Source URL (must be non-empty).
    pub url: String,
    /// Local destination path.
    pub destination: PathBuf,
    /// Optional tracking token. Without one the download cannot be polled.
    pub token: Option<String>,
}

impl TransferRequest {
    /// Create an untracked request.
    pub fn new(url: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            destination: destination.into(),
            token: None,
        }
    }

    /// Attach a tracking token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Public interface of the transfer subsystem.
#[async_trait]
pub trait TransferTrackerPort: Send + Sync {
    /// Run a download to completion.
    ///
    /// Resolves once the destination is fully written, or fails with the
    /// first error observed (the partial file is removed before returning).
    async fn start(&self, request: TransferRequest) -> DownloadResult<()>;

    /// Snapshot of the record for `token`, `None` if unknown or released.
    async fn status(&self, token: &str) -> Option<DownloadRecord>;

    /// Serialized snapshot (`{ receivedBytes, totalBytes, error }`).
    async fn status_json(&self, token: &str) -> Option<String> {
        let record = self.status(token).await?;
        serde_json::to_string(&record.snapshot()).ok()
    }

    /// Drop the record for `token`. Does not stop an in-flight transfer.
    async fn release(&self, token: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder() {
        let req = TransferRequest::new("https://example.invalid/f", "/tmp/f").with_token("t");
        assert_eq!(req.token.as_deref(), Some("t"));
        assert_eq!(req.destination, PathBuf::from("/tmp/f"));
    }
}
