//! Transfer events - discriminated union for download lifecycle changes.

use serde::{Deserialize, Serialize};

/// Single discriminated union for all transfer events.
///
/// Untracked downloads report `token: None`; observers can still follow them
/// through events even though they cannot be polled.
///
/// ```typescript
/// type TransferEvent =
///   | { type: "transfer_started"; token?: string; url: string }
///   | { type: "transfer_progress"; token?: string; received_bytes: number; total_bytes?: number }
///   | { type: "transfer_completed"; token?: string; received_bytes: number }
///   | { type: "transfer_failed"; token?: string; error: string };
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransferEvent {
    /// A download has been accepted and is about to open its streams.
    TransferStarted {
        /// Tracking token, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        token: Option<String>,
        /// Source URL.
        url: String,
    },

    /// Bytes have been written to the destination.
    TransferProgress {
        /// Tracking token, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        token: Option<String>,
        /// Bytes written so far.
        received_bytes: u64,
        /// Declared total, if known.
        #[serde(skip_serializing_if = "Option::is_none")]
        total_bytes: Option<u64>,
    },

    /// The destination was fully written.
    TransferCompleted {
        /// Tracking token, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        token: Option<String>,
        /// Final byte count.
        received_bytes: u64,
    },

    /// The download failed and the partial file was discarded.
    TransferFailed {
        /// Tracking token, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        token: Option<String>,
        /// Error message describing what went wrong.
        error: String,
    },
}

impl TransferEvent {
    /// Create a started event.
    pub fn started(token: Option<&str>, url: impl Into<String>) -> Self {
        Self::TransferStarted {
            token: token.map(str::to_string),
            url: url.into(),
        }
    }

    /// Create a progress event.
    pub fn progress(token: Option<&str>, received_bytes: u64, total_bytes: Option<u64>) -> Self {
        Self::TransferProgress {
            token: token.map(str::to_string),
            received_bytes,
            total_bytes,
        }
    }

    /// Create a completed event.
    pub fn completed(token: Option<&str>, received_bytes: u64) -> Self {
        Self::TransferCompleted {
            token: token.map(str::to_string),
            received_bytes,
        }
    }

    /// Create a failed event.
    pub fn failed(token: Option<&str>, error: impl Into<String>) -> Self {
        Self::TransferFailed {
            token: token.map(str::to_string),
            error: error.into(),
        }
    }

    /// Token carried by this event.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::TransferStarted { token, .. }
            | Self::TransferProgress { token, .. }
            | Self::TransferCompleted { token, .. }
            | Self::TransferFailed { token, .. } => token.as_deref(),
        }
    }

    /// Whether this is the last event a download emits.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::TransferCompleted { .. } | Self::TransferFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = TransferEvent::progress(Some("t1"), 10, Some(100));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "transfer_progress");
        assert_eq!(json["token"], "t1");
        assert_eq!(json["received_bytes"], 10);
    }

    #[test]
    fn untracked_events_omit_token() {
        let event = TransferEvent::started(None, "https://example.invalid/a");
        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("token"));
        assert_eq!(event.token(), None);
    }

    #[test]
    fn terminal_detection() {
        assert!(TransferEvent::completed(None, 1).is_terminal());
        assert!(TransferEvent::failed(None, "x").is_terminal());
        assert!(!TransferEvent::progress(None, 1, None).is_terminal());
    }
}
