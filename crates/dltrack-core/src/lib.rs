//! Core domain types and port definitions for dltrack.
//!
//! - `download` - records, events and errors
//! - `ports` - transport, sink, emitter and tracker traits
#![deny(unused_crate_dependencies)]

pub mod download;
pub mod ports;

// Re-export commonly used types for convenience
pub use download::{
    DownloadError, DownloadRecord, DownloadResult, ErrorSnapshot, StatusSnapshot, TransferEvent,
    parse_content_length,
};
pub use ports::{
    ByteStream, DestinationSink, NoopTransferEmitter, ResponseHead, SinkWriter, SourceResponse,
    TransferEventEmitterPort, TransferRequest, TransferTrackerPort, Transport,
};
