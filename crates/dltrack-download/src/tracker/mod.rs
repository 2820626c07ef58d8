//! Transfer tracker implementation.
//!
//! This module provides the concrete implementation of `TransferTrackerPort`.
//!
//! # Architecture
//!
//! - **Registry**: token → record map with lease-guarded updates
//! - **Pipeline**: streams one source into one sink, reporting to an observer
//! - **Tracker**: validates requests, registers records, settles the outcome
//!
//! # Concurrency Model
//!
//! - Any number of `start` calls may run at once; each owns its streams
//! - The registry lock is never held across I/O
//! - Releasing a token only detaches observability; the transfer keeps going

mod pipeline;
mod registry;

use std::sync::Arc;

use async_trait::async_trait;

use dltrack_core::{
    DestinationSink, DownloadError, DownloadRecord, DownloadResult, NoopTransferEmitter,
    TransferEvent, TransferEventEmitterPort, TransferRequest, TransferTrackerPort, Transport,
};

use crate::config::TransferConfig;
use crate::progress::ProgressThrottle;
use crate::sink::FsSink;
use crate::transport::ReqwestTransport;

use pipeline::{Collaborators, Destination, Observer};
use registry::Registry;

const TARGET: &str = "dltrack.transfer";

/// Dependencies for creating a transfer tracker.
pub struct TransferTrackerDeps<T, S, E>
where
    T: Transport + 'static,
    S: DestinationSink + 'static,
    E: TransferEventEmitterPort + 'static,
{
    /// Port for fetching sources.
    pub transport: Arc<T>,
    /// Port for writing destinations.
    pub sink: Arc<S>,
    /// Port for emitting transfer events.
    pub event_emitter: Arc<E>,
    /// Configuration.
    pub config: TransferConfig,
}

/// Build a transfer tracker from its dependencies.
///
/// Returns an implementation of `TransferTrackerPort` that can be stored as
/// `Arc<dyn TransferTrackerPort>` in adapters.
pub fn build_transfer_tracker<T, S, E>(deps: TransferTrackerDeps<T, S, E>) -> TransferTracker
where
    T: Transport + 'static,
    S: DestinationSink + 'static,
    E: TransferEventEmitterPort + 'static,
{
    TransferTracker {
        transport: deps.transport,
        sink: deps.sink,
        event_emitter: deps.event_emitter,
        config: deps.config,
        registry: Registry::new(),
    }
}

/// Build a tracker wired to HTTP and the local filesystem.
pub fn build_default_tracker<E>(
    config: TransferConfig,
    event_emitter: Arc<E>,
) -> DownloadResult<TransferTracker>
where
    E: TransferEventEmitterPort + 'static,
{
    let transport = Arc::new(ReqwestTransport::new(&config)?);
    let sink = Arc::new(FsSink::new().with_create_parent_dirs(config.create_parent_dirs));
    Ok(build_transfer_tracker(TransferTrackerDeps {
        transport,
        sink,
        event_emitter,
        config,
    }))
}

/// Concrete transfer tracker.
///
/// Owns the token registry; there is no process-wide state. Share one
/// instance through `Arc` when several callers need to see the same tokens.
pub struct TransferTracker {
    transport: Arc<dyn Transport>,
    sink: Arc<dyn DestinationSink>,
    event_emitter: Arc<dyn TransferEventEmitterPort>,
    config: TransferConfig,
    registry: Registry,
}

impl TransferTracker {
    /// Tracker with explicit transport and sink, and no event observers.
    pub fn new(
        transport: Arc<dyn Transport>,
        sink: Arc<dyn DestinationSink>,
        config: TransferConfig,
    ) -> Self {
        Self {
            transport,
            sink,
            event_emitter: Arc::new(NoopTransferEmitter::new()),
            config,
            registry: Registry::new(),
        }
    }

    /// Number of records currently held (tracked and not yet released).
    pub async fn tracked_count(&self) -> usize {
        self.registry.len().await
    }

    /// Run one download. See [`TransferTrackerPort::start`].
    pub async fn start(&self, request: TransferRequest) -> DownloadResult<()> {
        let TransferRequest {
            url,
            destination,
            token,
        } = request;

        if url.trim().is_empty() {
            return Err(DownloadError::invalid_request("source URL is empty"));
        }

        let tracking = match token.as_deref() {
            Some(token) => Some((token, self.registry.register(token).await?)),
            None => None,
        };

        tracing::debug!(
            target: TARGET,
            token = ?token,
            url = %url,
            destination = %destination.display(),
            "Starting transfer"
        );
        self.event_emitter
            .emit(TransferEvent::started(token.as_deref(), url.clone()));

        let mut observer = Observer::new(
            &self.registry,
            tracking,
            self.event_emitter.as_ref(),
            ProgressThrottle::new(self.config.progress_interval),
        );
        let collaborators = Collaborators {
            transport: self.transport.as_ref(),
            sink: self.sink.as_ref(),
            require_content_length: self.config.require_content_length(),
        };

        let opened =
            pipeline::stream_to_sink(&collaborators, &url, &destination, &mut observer).await;

        observer.flush_progress();

        if let Some(error) = observer.take_error() {
            if opened == Destination::Created {
                if let Err(discard_err) = self.sink.discard(&destination).await {
                    tracing::warn!(
                        target: TARGET,
                        destination = %destination.display(),
                        error = %discard_err,
                        "Failed to remove partial download"
                    );
                }
            }
            tracing::warn!(target: TARGET, token = ?token, url = %url, %error, "Transfer failed");
            self.event_emitter
                .emit(TransferEvent::failed(token.as_deref(), error.to_string()));
            return Err(error);
        }

        tracing::info!(
            target: TARGET,
            token = ?token,
            bytes = observer.received(),
            destination = %destination.display(),
            "Transfer completed"
        );
        self.event_emitter.emit(TransferEvent::completed(
            token.as_deref(),
            observer.received(),
        ));
        Ok(())
    }

    /// Snapshot of the record for `token`.
    pub async fn status(&self, token: &str) -> Option<DownloadRecord> {
        self.registry.snapshot(token).await
    }

    /// Drop the record for `token`; the transfer itself is not interrupted.
    pub async fn release(&self, token: &str) {
        if self.registry.release(token).await {
            tracing::debug!(target: TARGET, token, "Released tracking record");
        }
    }
}

#[async_trait]
impl TransferTrackerPort for TransferTracker {
    async fn start(&self, request: TransferRequest) -> DownloadResult<()> {
        Self::start(self, request).await
    }

    async fn status(&self, token: &str) -> Option<DownloadRecord> {
        Self::status(self, token).await
    }

    async fn release(&self, token: &str) {
        Self::release(self, token).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    use dltrack_core::{SinkWriter, SourceResponse};
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        pub Sink {}

        #[async_trait]
        impl DestinationSink for Sink {
            async fn create(&self, path: &Path) -> DownloadResult<SinkWriter>;
            async fn discard(&self, path: &Path) -> DownloadResult<()>;
        }
    }

    mock! {
        pub Source {}

        #[async_trait]
        impl Transport for Source {
            async fn open(&self, url: &str) -> DownloadResult<SourceResponse>;
        }
    }

    fn tracker(transport: MockSource, sink: MockSink) -> TransferTracker {
        TransferTracker::new(Arc::new(transport), Arc::new(sink), TransferConfig::new())
    }

    #[tokio::test]
    async fn sink_failure_skips_transport_and_discard() {
        let mut sink = MockSink::new();
        sink.expect_create()
            .times(1)
            .returning(|_| Err(DownloadError::io("PermissionDenied", "denied")));
        sink.expect_discard().times(0);

        let mut transport = MockSource::new();
        transport.expect_open().times(0);

        let tracker = tracker(transport, sink);
        let request = TransferRequest::new("http://example.invalid/f", "/nope/f").with_token("t");
        let err = tracker.start(request).await.unwrap_err();

        assert_eq!(err, DownloadError::io("PermissionDenied", "denied"));
        assert_eq!(tracker.status("t").await.unwrap().error, Some(err));
    }

    #[tokio::test]
    async fn transport_failure_discards_created_destination() {
        let dest = PathBuf::from("/downloads/f.bin");

        let mut sink = MockSink::new();
        sink.expect_create()
            .times(1)
            .returning(|_| Ok(Box::pin(tokio::io::sink())));
        sink.expect_discard()
            .with(eq(dest.clone()))
            .times(1)
            .returning(|_| Ok(()));

        let mut transport = MockSource::new();
        transport
            .expect_open()
            .with(eq("http://example.invalid/f"))
            .times(1)
            .returning(|_| Err(DownloadError::network("connection refused")));

        let tracker = tracker(transport, sink);
        let err = tracker
            .start(TransferRequest::new("http://example.invalid/f", dest))
            .await
            .unwrap_err();

        assert_eq!(err, DownloadError::network("connection refused"));
        assert_eq!(tracker.tracked_count().await, 0);
    }

    #[tokio::test]
    async fn empty_url_is_rejected_before_registration() {
        let mut sink = MockSink::new();
        sink.expect_create().times(0);
        let mut transport = MockSource::new();
        transport.expect_open().times(0);

        let tracker = tracker(transport, sink);
        let err = tracker
            .start(TransferRequest::new("  ", "/tmp/x").with_token("t"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "invalid_request");
        assert!(tracker.status("t").await.is_none());
    }
}
