//! Local filesystem sink.

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use tokio::fs::{self, File};
use tokio::io::BufWriter;

use dltrack_core::{DestinationSink, DownloadError, DownloadResult, SinkWriter};

/// Write buffer in front of each destination file.
const WRITE_BUFFER_BYTES: usize = 64 * 1024;

/// Writes destinations to the local filesystem.
///
/// Writers are buffered. A chunk is accepted once it is in the buffer, so a
/// disk error may only surface on a later write or at shutdown.
#[derive(Debug, Clone, Default)]
pub struct FsSink {
    create_parent_dirs: bool,
}

impl FsSink {
    /// Create a sink that requires the destination directory to exist.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            create_parent_dirs: false,
        }
    }

    /// Create missing parent directories before opening the destination.
    #[must_use]
    pub const fn with_create_parent_dirs(mut self, create: bool) -> Self {
        self.create_parent_dirs = create;
        self
    }
}

#[async_trait]
impl DestinationSink for FsSink {
    async fn create(&self, path: &Path) -> DownloadResult<SinkWriter> {
        if self.create_parent_dirs {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| DownloadError::from_io_error(&e))?;
            }
        }

        let file = File::create(path)
            .await
            .map_err(|e| DownloadError::from_io_error(&e))?;
        Ok(Box::pin(BufWriter::with_capacity(WRITE_BUFFER_BYTES, file)))
    }

    async fn discard(&self, path: &Path) -> DownloadResult<()> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DownloadError::from_io_error(&e)),
        }
    }
}
