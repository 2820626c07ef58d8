//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options. Every
//! transfer option can also be set through the environment (or a `.env`
//! file loaded at startup).

use std::time::Duration;

use clap::Parser;

use dltrack_download::TransferConfig;

use crate::commands::Commands;

/// Command-line interface for tokenized, pollable downloads.
#[derive(Parser, Debug)]
#[command(name = "dltrack")]
#[command(about = "Download files with pollable progress tracking")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// User agent sent with requests
    #[arg(long = "user-agent", env = "DLTRACK_USER_AGENT", global = true)]
    pub user_agent: Option<String>,

    /// Connection timeout in seconds
    #[arg(
        long = "connect-timeout",
        env = "DLTRACK_CONNECT_TIMEOUT_SECS",
        default_value_t = 30,
        global = true
    )]
    pub connect_timeout_secs: u64,

    /// Overall request timeout in seconds (unlimited when unset)
    #[arg(long = "request-timeout", env = "DLTRACK_REQUEST_TIMEOUT_SECS", global = true)]
    pub request_timeout_secs: Option<u64>,

    /// Accept responses without a valid Content-Length
    #[arg(
        long = "allow-unknown-length",
        env = "DLTRACK_ALLOW_UNKNOWN_LENGTH",
        global = true
    )]
    pub allow_unknown_length: bool,

    /// Create missing parent directories of destinations
    #[arg(long = "mkdir", global = true)]
    pub create_dirs: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Transfer configuration derived from the global options.
    pub fn transfer_config(&self) -> TransferConfig {
        let mut config = TransferConfig::new()
            .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .with_request_timeout(self.request_timeout_secs.map(Duration::from_secs))
            .with_require_content_length(!self.allow_unknown_length)
            .with_create_parent_dirs(self.create_dirs);
        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent.clone());
        }
        config
    }

    /// Default log filter for this invocation.
    pub const fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_get_command() {
        let cli = Cli::parse_from([
            "dltrack",
            "get",
            "https://example.invalid/f.zip",
            "/tmp/f.zip",
            "--token",
            "job-1",
        ]);
        match cli.command {
            Some(Commands::Get {
                url,
                dest,
                token,
                poll_ms,
            }) => {
                assert_eq!(url, "https://example.invalid/f.zip");
                assert_eq!(dest, PathBuf::from("/tmp/f.zip"));
                assert_eq!(token.as_deref(), Some("job-1"));
                assert_eq!(poll_ms, crate::commands::DEFAULT_POLL_MS);
            }
            other => panic!("Expected Get, got {other:?}"),
        }
    }

    #[test]
    fn test_global_args_build_config() {
        let cli = Cli::parse_from([
            "dltrack",
            "--verbose",
            "--allow-unknown-length",
            "--mkdir",
            "--request-timeout",
            "600",
            "batch",
            "jobs.json",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.log_level(), "debug");
        assert_eq!(cli.request_timeout_secs, Some(600));

        let config = cli.transfer_config();
        assert!(!config.require_content_length());
    }
}
