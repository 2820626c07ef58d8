//! Command handlers.
//!
//! Each handler receives the composed `CliContext` and drives the tracker
//! through `TransferTrackerPort`, polling `status` while the transfer runs.

pub mod batch;
pub mod get;

use std::time::Duration;

use dltrack_core::{DownloadResult, TransferRequest, TransferTrackerPort};

use crate::presentation::TransferBar;

/// Run `request` to completion, refreshing `bar` from its record every `poll`.
///
/// The request must carry a token; without one there is nothing to poll and
/// the bar only reflects the outcome.
pub async fn track(
    tracker: &dyn TransferTrackerPort,
    request: TransferRequest,
    bar: &mut TransferBar,
    poll: Duration,
) -> DownloadResult<()> {
    let token = request.token.clone();
    let transfer = tracker.start(request);
    tokio::pin!(transfer);

    let mut ticker = tokio::time::interval(poll.max(Duration::from_millis(1)));
    let result = loop {
        tokio::select! {
            result = &mut transfer => break result,
            _ = ticker.tick() => {
                if let Some(token) = token.as_deref() {
                    refresh(tracker, token, bar).await;
                }
            }
        }
    };

    if let Some(token) = token.as_deref() {
        refresh(tracker, token, bar).await;
    }
    match &result {
        Ok(()) => bar.finish_ok(),
        Err(error) => bar.finish_err(&error.user_message()),
    }
    result
}

async fn refresh(tracker: &dyn TransferTrackerPort, token: &str, bar: &mut TransferBar) {
    if let Some(record) = tracker.status(token).await {
        bar.update(&record);
    }
}
