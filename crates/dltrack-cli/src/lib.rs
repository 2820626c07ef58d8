//! CLI adapter for dltrack.
//!
//! Wires the transfer tracker to HTTP and the local filesystem and drives it
//! from the terminal, polling `status` to render progress.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;

// Used only by the binary target
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod manifest;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliContext, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
