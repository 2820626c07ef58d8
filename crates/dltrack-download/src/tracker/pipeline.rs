//! Single-download pipeline.
//!
//! Streams one source into one destination and records what happens. Every
//! event goes through [`Observer`], which keeps the first error locally and
//! mirrors it onto the tracked record. The outcome returned to the caller and
//! the error shown to pollers are therefore always the same value.

use std::path::Path;

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;

use dltrack_core::{
    DestinationSink, DownloadError, ResponseHead, SourceResponse, TransferEvent,
    TransferEventEmitterPort, Transport,
};

use super::registry::{LeaseId, Registry};
use crate::progress::ProgressThrottle;

const TARGET: &str = "dltrack.transfer";

/// Observes one download and keeps the record in sync.
pub(crate) struct Observer<'a> {
    registry: &'a Registry,
    tracking: Option<(&'a str, LeaseId)>,
    emitter: &'a dyn TransferEventEmitterPort,
    throttle: ProgressThrottle,
    received: u64,
    total: Option<u64>,
    overrun_logged: bool,
    first_error: Option<DownloadError>,
}

impl<'a> Observer<'a> {
    pub(crate) const fn new(
        registry: &'a Registry,
        tracking: Option<(&'a str, LeaseId)>,
        emitter: &'a dyn TransferEventEmitterPort,
        throttle: ProgressThrottle,
    ) -> Self {
        Self {
            registry,
            tracking,
            emitter,
            throttle,
            received: 0,
            total: None,
            overrun_logged: false,
            first_error: None,
        }
    }

    fn token(&self) -> Option<&'a str> {
        self.tracking.map(|(token, _)| token)
    }

    /// Latch `error` locally and on the record. First error wins on both.
    pub(crate) async fn latch(&mut self, error: DownloadError) {
        if self.first_error.is_some() {
            tracing::debug!(target: TARGET, token = ?self.token(), %error, "Dropping subsequent error");
            return;
        }

        tracing::debug!(target: TARGET, token = ?self.token(), %error, "Latching error");
        if let Some((token, lease)) = self.tracking {
            let latch = error.clone();
            self.registry
                .update(token, lease, move |record| record.latch_error(latch))
                .await;
        }
        self.first_error = Some(error);
    }

    /// Handle the response head.
    async fn on_head(&mut self, head: &ResponseHead, require_content_length: bool) {
        self.total = head.declared_length();

        if let (Some(total), Some((token, lease))) = (self.total, self.tracking) {
            self.registry
                .update(token, lease, |record| record.total_bytes = Some(total))
                .await;
        }

        if self.total.is_none() {
            if require_content_length {
                self.latch(DownloadError::invalid_content_length(
                    head.content_length.clone(),
                ))
                .await;
            } else {
                tracing::debug!(
                    target: TARGET,
                    token = ?self.token(),
                    raw = ?head.content_length,
                    "No usable content-length, total stays unknown"
                );
            }
        }
    }

    /// Handle a chunk that the destination accepted.
    async fn on_chunk(&mut self, len: u64) {
        self.received = self.received.saturating_add(len);

        let overrun = match self.tracking {
            Some((token, lease)) => self
                .registry
                .update(token, lease, |record| record.add_received(len))
                .await
                .unwrap_or(false),
            None => matches!(self.total, Some(total) if self.received > total),
        };
        if overrun && !self.overrun_logged {
            self.overrun_logged = true;
            tracing::warn!(
                target: TARGET,
                token = ?self.token(),
                received = self.received,
                total = ?self.total,
                "Received more bytes than the declared content-length"
            );
        }

        if self.throttle.admit(self.received) {
            self.emit_progress();
        }
    }

    fn emit_progress(&self) {
        self.emitter.emit(TransferEvent::progress(
            self.token(),
            self.received,
            self.total,
        ));
    }

    /// Emit the final progress value unless the last event already carried
    /// it. Used right before the terminal event.
    pub(crate) fn flush_progress(&mut self) {
        if self.throttle.settle(self.received) {
            self.emit_progress();
        }
    }

    pub(crate) const fn received(&self) -> u64 {
        self.received
    }

    /// The single outcome of the download.
    pub(crate) fn take_error(&mut self) -> Option<DownloadError> {
        self.first_error.take()
    }
}

/// Borrowed collaborators for one pipeline run.
pub(crate) struct Collaborators<'a> {
    pub transport: &'a dyn Transport,
    pub sink: &'a dyn DestinationSink,
    pub require_content_length: bool,
}

/// Whether the destination was opened (and may need discarding).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Destination {
    NotCreated,
    Created,
}

/// Stream `url` into `destination`, reporting everything to `observer`.
///
/// Never fails directly: errors are latched on the observer and the caller
/// reads the outcome from it afterwards.
pub(crate) async fn stream_to_sink(
    collaborators: &Collaborators<'_>,
    url: &str,
    destination: &Path,
    observer: &mut Observer<'_>,
) -> Destination {
    // Step 1: Open the destination
    let mut writer = match collaborators.sink.create(destination).await {
        Ok(writer) => writer,
        Err(e) => {
            observer.latch(e).await;
            return Destination::NotCreated;
        }
    };

    // Step 2: Open the source
    let SourceResponse { head, mut body } = match collaborators.transport.open(url).await {
        Ok(source) => source,
        Err(e) => {
            observer.latch(e).await;
            drop(writer);
            return Destination::Created;
        }
    };

    // Step 3: Response head, before any chunk is read
    observer
        .on_head(&head, collaborators.require_content_length)
        .await;

    // Step 4: Pipe chunks
    while let Some(item) = body.next().await {
        match item {
            Ok(chunk) => {
                if let Err(e) = writer.write_all(&chunk).await {
                    observer.latch(DownloadError::from_io_error(&e)).await;
                    break;
                }
                observer
                    .on_chunk(u64::try_from(chunk.len()).unwrap_or(u64::MAX))
                    .await;
            }
            Err(e) => {
                observer.latch(e).await;
                break;
            }
        }
    }
    drop(body);

    // Step 5: Finish (flush everything accepted so far)
    if let Err(e) = writer.shutdown().await {
        observer.latch(DownloadError::from_io_error(&e)).await;
    }

    Destination::Created
}
