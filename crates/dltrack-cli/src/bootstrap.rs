//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together for
//! the CLI adapter: the reqwest transport, the filesystem sink and an event
//! emitter that forwards transfer events to `tracing`.

use std::sync::Arc;

use dltrack_core::{TransferEvent, TransferEventEmitterPort, TransferTrackerPort};
use dltrack_download::{TransferConfig, build_default_tracker};

use crate::error::CliError;

/// Emitter that logs transfer events at debug level.
#[derive(Debug, Clone, Default)]
pub struct TracingEmitter;

impl TransferEventEmitterPort for TracingEmitter {
    fn emit(&self, event: TransferEvent) {
        match &event {
            TransferEvent::TransferFailed { token, error } => {
                tracing::debug!(target: "dltrack.events", token = ?token, error = %error, "transfer failed");
            }
            other => tracing::debug!(target: "dltrack.events", event = ?other),
        }
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// The shared transfer tracker.
    pub tracker: Arc<dyn TransferTrackerPort>,
}

/// Compose the CLI context from the transfer configuration.
pub fn bootstrap(config: TransferConfig) -> Result<CliContext, CliError> {
    let tracker = build_default_tracker(config, Arc::new(TracingEmitter))?;
    Ok(CliContext {
        tracker: Arc::new(tracker),
    })
}
