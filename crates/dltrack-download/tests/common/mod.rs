//! Shared fixtures for tracker integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use tokio::sync::mpsc;

use dltrack_download::{
    DestinationSink, DownloadError, DownloadRecord, DownloadResult, FsSink, ResponseHead,
    SinkWriter, SourceResponse, TransferConfig, TransferEvent, TransferEventEmitterPort,
    TransferTracker, TransferTrackerDeps, Transport, build_transfer_tracker,
};

/// Sender side of a paced source: push chunks or errors, drop to end the body.
pub type Feed = mpsc::UnboundedSender<DownloadResult<Bytes>>;

enum Script {
    Refuse(DownloadError),
    Serve {
        head: ResponseHead,
        body: mpsc::UnboundedReceiver<DownloadResult<Bytes>>,
    },
}

/// Transport whose responses are scripted per URL. Each script is consumed
/// by the first `open` of its URL.
#[derive(Default)]
pub struct ScriptedTransport {
    scripts: Mutex<HashMap<String, Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Serve `url` with `head`; the body is fed through the returned sender.
    pub fn paced(&self, url: &str, head: ResponseHead) -> Feed {
        let (tx, rx) = mpsc::unbounded_channel();
        self.scripts
            .lock()
            .unwrap()
            .insert(url.to_string(), Script::Serve { head, body: rx });
        tx
    }

    /// Serve `url` with `head` and a complete body.
    pub fn serve(&self, url: &str, head: ResponseHead, chunks: &[&[u8]]) {
        let feed = self.paced(url, head);
        for chunk in chunks {
            feed.send(Ok(Bytes::copy_from_slice(chunk))).unwrap();
        }
    }

    /// Fail `open` for `url`.
    pub fn refuse(&self, url: &str, error: DownloadError) {
        self.scripts
            .lock()
            .unwrap()
            .insert(url.to_string(), Script::Refuse(error));
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn open(&self, url: &str) -> DownloadResult<SourceResponse> {
        let script = self
            .scripts
            .lock()
            .unwrap()
            .remove(url)
            .unwrap_or_else(|| Script::Refuse(DownloadError::network(format!("no script for {url}"))));

        match script {
            Script::Refuse(error) => Err(error),
            Script::Serve { head, body } => {
                let body = futures_util::stream::unfold(body, |mut rx| async move {
                    rx.recv().await.map(|item| (item, rx))
                })
                .boxed();
                Ok(SourceResponse { head, body })
            }
        }
    }
}

/// Emitter that records every event.
#[derive(Default)]
pub struct RecordingEmitter {
    events: Mutex<Vec<TransferEvent>>,
}

impl RecordingEmitter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<TransferEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn events_for(&self, token: &str) -> Vec<TransferEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.token() == Some(token))
            .collect()
    }
}

impl TransferEventEmitterPort for RecordingEmitter {
    fn emit(&self, event: TransferEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Sink that creates the real file (so discard can be observed) but hands
/// out a caller-provided writer instead of the file handle.
pub struct SwappedWriterSink<F> {
    fs: FsSink,
    make_writer: F,
}

impl<F> SwappedWriterSink<F>
where
    F: Fn() -> SinkWriter + Send + Sync,
{
    pub fn new(make_writer: F) -> Arc<Self> {
        Arc::new(Self {
            fs: FsSink::new(),
            make_writer,
        })
    }
}

#[async_trait]
impl<F> DestinationSink for SwappedWriterSink<F>
where
    F: Fn() -> SinkWriter + Send + Sync,
{
    async fn create(&self, path: &Path) -> DownloadResult<SinkWriter> {
        tokio::fs::write(path, b"").await?;
        Ok((self.make_writer)())
    }

    async fn discard(&self, path: &Path) -> DownloadResult<()> {
        self.fs.discard(path).await
    }
}

/// Tracker over a scripted transport and the real filesystem.
pub fn tracker_with(
    transport: Arc<ScriptedTransport>,
    emitter: Arc<RecordingEmitter>,
    config: TransferConfig,
) -> Arc<TransferTracker> {
    Arc::new(build_transfer_tracker(TransferTrackerDeps {
        transport,
        sink: Arc::new(FsSink::new()),
        event_emitter: emitter,
        config,
    }))
}

/// Config that emits every progress event.
pub fn unthrottled() -> TransferConfig {
    TransferConfig::new().with_progress_interval(Duration::ZERO)
}

/// Poll `status(token)` until `pred` holds, failing after two seconds.
pub async fn wait_for(
    tracker: &TransferTracker,
    token: &str,
    pred: impl Fn(&DownloadRecord) -> bool,
) -> DownloadRecord {
    let poll = async {
        loop {
            if let Some(record) = tracker.status(token).await {
                if pred(&record) {
                    return record;
                }
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    };
    tokio::time::timeout(Duration::from_secs(2), poll)
        .await
        .expect("condition not reached in time")
}
