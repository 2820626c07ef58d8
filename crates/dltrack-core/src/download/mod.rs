//! Download domain types, events and errors.
//!
//! This module contains pure data types for the transfer system. No I/O,
//! networking, or runtime dependencies allowed.
//!
//! # Structure
//!
//! - `record` - Per-token tracking state and its wire snapshot
//! - `events` - Lifecycle events (`TransferEvent`)
//! - `errors` - Error types for download operations

pub mod errors;
pub mod events;
pub mod record;

// Re-export commonly used types
pub use errors::{DownloadError, DownloadResult};
pub use events::TransferEvent;
pub use record::{DownloadRecord, ErrorSnapshot, StatusSnapshot, parse_content_length};
