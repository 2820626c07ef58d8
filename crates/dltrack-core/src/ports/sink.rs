//! Destination sink port definition.
//!
//! The sink owns the local side of a transfer: creating a writable stream for
//! a destination path and deleting a partially written file on failure.

use std::path::Path;
use std::pin::Pin;

use async_trait::async_trait;
use tokio::io::AsyncWrite;

use crate::download::DownloadResult;

/// A writable destination. `shutdown` completing successfully is the
/// `finish` signal: all accepted bytes have been flushed.
pub type SinkWriter = Pin<Box<dyn AsyncWrite + Send>>;

/// Port for local destination storage.
#[async_trait]
pub trait DestinationSink: Send + Sync {
    /// Create (or truncate) the destination at `path`.
    async fn create(&self, path: &Path) -> DownloadResult<SinkWriter>;

    /// Delete a partially written destination. Missing files are not an error.
    async fn discard(&self, path: &Path) -> DownloadResult<()>;
}
