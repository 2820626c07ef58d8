//! Transfer event emitter port.
//!
//! This port abstracts event emission, allowing the tracker to publish
//! lifecycle events without coupling to transport details (IPC, channels,
//! terminal output).

use crate::download::TransferEvent;

/// Port for emitting transfer events.
///
/// Implementations handle the actual event delivery. This method should
/// not block.
pub trait TransferEventEmitterPort: Send + Sync {
    /// Emit a transfer event.
    fn emit(&self, event: TransferEvent);
}

/// A no-op emitter for tests and callers that only poll.
#[derive(Debug, Clone, Default)]
pub struct NoopTransferEmitter;

impl NoopTransferEmitter {
    /// Create a new no-op emitter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TransferEventEmitterPort for NoopTransferEmitter {
    fn emit(&self, _event: TransferEvent) {
        // Intentionally do nothing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_noop_emitter() {
        let emitter = NoopTransferEmitter::new();
        emitter.emit(TransferEvent::started(Some("t"), "https://example.invalid"));
    }

    #[test]
    fn test_arc_emitter() {
        let emitter: Arc<dyn TransferEventEmitterPort> = Arc::new(NoopTransferEmitter::new());
        emitter.emit(TransferEvent::completed(None, 0));
    }
}
