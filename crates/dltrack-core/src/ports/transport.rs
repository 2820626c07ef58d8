//! Transport port definition.
//!
//! The transport performs the network side of a transfer: it opens a source
//! by URL, reports the response head, and yields the body as a stream of byte
//! chunks. No HTTP client types leak through this interface.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;

use crate::download::{DownloadResult, parse_content_length};

/// Response metadata reported before the first chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHead {
    /// Raw content-length header value, exactly as received.
    pub content_length: Option<String>,
}

impl ResponseHead {
    /// Create a head with a raw content-length value.
    pub fn new(content_length: Option<&str>) -> Self {
        Self {
            content_length: content_length.map(str::to_string),
        }
    }

    /// Create a head for a known length.
    #[must_use]
    pub fn with_length(len: u64) -> Self {
        Self {
            content_length: Some(len.to_string()),
        }
    }

    /// Parsed content length, `None` if missing or invalid.
    #[must_use]
    pub fn declared_length(&self) -> Option<u64> {
        parse_content_length(self.content_length.as_deref())
    }
}

/// Body of an opened source: chunks in arrival order, or a transport error.
pub type ByteStream = BoxStream<'static, DownloadResult<Bytes>>;

/// An opened source.
pub struct SourceResponse {
    /// Response head (the `response` event).
    pub head: ResponseHead,
    /// Body chunks (the `data` events) and mid-stream failures (`error`).
    pub body: ByteStream,
}

impl std::fmt::Debug for SourceResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceResponse")
            .field("head", &self.head)
            .finish_non_exhaustive()
    }
}

/// Port for fetching a remote resource as a byte stream.
///
/// Implementations must report connection-level failures from `open` and
/// mid-transfer failures as `Err` items in the body stream.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open `url` for reading.
    async fn open(&self, url: &str) -> DownloadResult<SourceResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_length_parses_valid_header() {
        assert_eq!(ResponseHead::with_length(1000).declared_length(), Some(1000));
        assert_eq!(ResponseHead::new(Some("12")).declared_length(), Some(12));
    }

    #[test]
    fn declared_length_rejects_missing_or_bad_header() {
        assert_eq!(ResponseHead::default().declared_length(), None);
        assert_eq!(ResponseHead::new(Some("twelve")).declared_length(), None);
    }
}
