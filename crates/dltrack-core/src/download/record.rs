//! Per-token tracking state for observable downloads.

use serde::{Deserialize, Serialize};

use super::errors::DownloadError;

/// Tracking state of one tokenized download.
///
/// A record is created when a tracked download starts and lives until the
/// caller releases its token. It does not distinguish "in progress" from
/// "finished"; completion is only observable through the `start` result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadRecord {
    /// Caller-supplied token.
    pub token: String,
    /// Bytes written to the destination so far.
    pub received_bytes: u64,
    /// Declared size of the resource, if the source reported a valid one.
    pub total_bytes: Option<u64>,
    /// First error observed for this download.
    pub error: Option<DownloadError>,
}

impl DownloadRecord {
    /// Create a fresh record with no bytes received and no error.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            received_bytes: 0,
            total_bytes: None,
            error: None,
        }
    }

    /// Latch an error if none is set yet.
    ///
    /// Returns `true` when the error was stored.
    pub fn latch_error(&mut self, error: DownloadError) -> bool {
        if self.error.is_some() {
            return false;
        }
        self.error = Some(error);
        true
    }

    /// Add a chunk to the received counter.
    ///
    /// Returns `true` if the counter now exceeds the declared total.
    pub const fn add_received(&mut self, len: u64) -> bool {
        self.received_bytes = self.received_bytes.saturating_add(len);
        matches!(self.total_bytes, Some(total) if self.received_bytes > total)
    }

    /// Build the serializable snapshot handed to polling callers.
    #[must_use]
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            received_bytes: self.received_bytes,
            total_bytes: self.total_bytes,
            error: self.error.as_ref().map(ErrorSnapshot::from),
        }
    }
}

/// Wire form of a record: `{ receivedBytes, totalBytes, error }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    /// Bytes written so far.
    pub received_bytes: u64,
    /// Declared size, `null` when unknown.
    pub total_bytes: Option<u64>,
    /// Latched error, `null` when none.
    pub error: Option<ErrorSnapshot>,
}

/// Wire form of a latched error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSnapshot {
    /// Machine-readable kind (see [`DownloadError::kind`]).
    pub kind: String,
    /// Display message.
    pub message: String,
}

impl From<&DownloadError> for ErrorSnapshot {
    fn from(err: &DownloadError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Parse a raw content-length header value.
///
/// Accepts only a plain non-negative decimal integer (surrounding whitespace
/// is ignored). Signs, fractions and empty values are rejected.
#[must_use]
pub fn parse_content_length(raw: Option<&str>) -> Option<u64> {
    let value = raw?.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_empty() {
        let record = DownloadRecord::new("a");
        assert_eq!(record.received_bytes, 0);
        assert_eq!(record.total_bytes, None);
        assert!(record.error.is_none());
    }

    #[test]
    fn first_error_wins() {
        let mut record = DownloadRecord::new("a");
        assert!(record.latch_error(DownloadError::network("reset")));
        assert!(!record.latch_error(DownloadError::io("StorageFull", "disk full")));
        assert_eq!(record.error, Some(DownloadError::network("reset")));
    }

    #[test]
    fn add_received_reports_overrun() {
        let mut record = DownloadRecord::new("a");
        record.total_bytes = Some(10);
        assert!(!record.add_received(6));
        assert!(!record.add_received(4));
        assert!(record.add_received(1));
        assert_eq!(record.received_bytes, 11);
    }

    #[test]
    fn add_received_without_total_never_overruns() {
        let mut record = DownloadRecord::new("a");
        assert!(!record.add_received(u64::MAX));
        assert!(!record.add_received(1));
        assert_eq!(record.received_bytes, u64::MAX);
    }

    #[test]
    fn snapshot_uses_camel_case_and_nulls() {
        let mut record = DownloadRecord::new("a");
        record.total_bytes = Some(1000);
        record.received_bytes = 1000;
        let json = serde_json::to_value(record.snapshot()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"receivedBytes": 1000, "totalBytes": 1000, "error": null})
        );
    }

    #[test]
    fn snapshot_carries_error_message() {
        let mut record = DownloadRecord::new("a");
        record.latch_error(DownloadError::invalid_content_length(None));
        let snapshot = record.snapshot();
        let error = snapshot.error.unwrap();
        assert_eq!(error.kind, "invalid_content_length");
        assert_eq!(error.message, "Invalid content-length");
        assert_eq!(snapshot.total_bytes, None);
    }

    #[test]
    fn parse_content_length_accepts_plain_integers() {
        assert_eq!(parse_content_length(Some("0")), Some(0));
        assert_eq!(parse_content_length(Some("1000")), Some(1000));
        assert_eq!(parse_content_length(Some(" 42 ")), Some(42));
    }

    #[test]
    fn parse_content_length_rejects_garbage() {
        assert_eq!(parse_content_length(None), None);
        assert_eq!(parse_content_length(Some("")), None);
        assert_eq!(parse_content_length(Some("-1")), None);
        assert_eq!(parse_content_length(Some("+1")), None);
        assert_eq!(parse_content_length(Some("1.5")), None);
        assert_eq!(parse_content_length(Some("abc")), None);
        assert_eq!(parse_content_length(Some("99999999999999999999999")), None);
    }
}
