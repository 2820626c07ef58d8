//! Transfer tracker for dltrack.
//!
//! Runs concurrent file downloads, each optionally identified by a caller
//! token, and keeps a pollable record (bytes received, declared total, first
//! error) per token until the caller releases it.
//!
//! - `tracker` - `TransferTracker`, the `TransferTrackerPort` implementation
//! - `transport` - reqwest-backed `Transport`
//! - `sink` - filesystem `DestinationSink`
//! - `config` - `TransferConfig`
#![deny(unused_crate_dependencies)]

// Re-export core types for convenience
pub use dltrack_core::{
    DestinationSink, DownloadError, DownloadRecord, DownloadResult, ErrorSnapshot,
    NoopTransferEmitter, ResponseHead, SinkWriter, SourceResponse, StatusSnapshot, TransferEvent,
    TransferEventEmitterPort, TransferRequest, TransferTrackerPort, Transport,
};

// Internal modules (pub(crate) to keep implementation private)
pub(crate) mod progress;

mod config;
mod sink;
mod tracker;
mod transport;

pub use config::TransferConfig;
pub use sink::FsSink;
pub use tracker::{
    TransferTracker, TransferTrackerDeps, build_default_tracker, build_transfer_tracker,
};
pub use transport::ReqwestTransport;

// Silence unused dev-dependency warnings in unit-test builds
#[cfg(test)]
use bytes as _;
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tokio_test as _;
