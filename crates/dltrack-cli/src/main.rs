//! CLI entry point - the composition root.
//!
//! Loads `.env`, parses arguments, initializes logging, bootstraps the
//! tracker and dispatches to the command handlers.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use dltrack_cli::{Cli, CliError, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap reads `env` defaults
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(err.downcast_ref::<CliError>().map_or(1, CliError::exit_code))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.transfer_config();

    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    let ctx = bootstrap(config)?;

    match command {
        Commands::Get {
            url,
            dest,
            token,
            poll_ms,
        } => handlers::get::execute(&ctx, &url, &dest, token, poll_ms).await,
        Commands::Batch { manifest, poll_ms } => {
            handlers::batch::execute(&ctx, &manifest, poll_ms).await
        }
    }
}
