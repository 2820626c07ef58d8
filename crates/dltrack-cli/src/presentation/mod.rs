//! Terminal presentation for transfers.

mod progress;

pub use progress::{ProgressBoard, TransferBar, format_bytes};
