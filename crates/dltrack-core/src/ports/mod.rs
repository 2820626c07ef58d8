//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` types in any signature
//! - No filesystem implementation details beyond `Path` and `AsyncWrite`

pub mod event_emitter;
pub mod sink;
pub mod tracker;
pub mod transport;

pub use event_emitter::{NoopTransferEmitter, TransferEventEmitterPort};
pub use sink::{DestinationSink, SinkWriter};
pub use tracker::{TransferRequest, TransferTrackerPort};
pub use transport::{ByteStream, ResponseHead, SourceResponse, Transport};
