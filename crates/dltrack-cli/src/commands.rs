//! Main commands enum.
//!
//! This module defines the available commands for the CLI tool.

use std::path::PathBuf;

use clap::Subcommand;

/// Default interval between status polls, in milliseconds.
pub const DEFAULT_POLL_MS: u64 = 200;

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download one file, showing progress
    Get {
        /// Source URL
        url: String,
        /// Destination file path
        dest: PathBuf,
        /// Tracking token (defaults to one derived from the destination)
        #[arg(short, long)]
        token: Option<String>,
        /// Status polling interval in milliseconds
        #[arg(long = "poll-ms", default_value_t = DEFAULT_POLL_MS)]
        poll_ms: u64,
    },

    /// Download every entry of a JSON manifest concurrently
    Batch {
        /// Manifest file: `[{"url": "...", "dest": "...", "token": "..."}]`
        manifest: PathBuf,
        /// Status polling interval in milliseconds
        #[arg(long = "poll-ms", default_value_t = DEFAULT_POLL_MS)]
        poll_ms: u64,
    },
}
