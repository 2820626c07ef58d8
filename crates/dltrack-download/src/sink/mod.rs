//! Destination sink implementations.

mod fs;

pub use fs::FsSink;
