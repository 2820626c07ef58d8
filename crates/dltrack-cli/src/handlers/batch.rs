//! `batch` command: download every manifest entry concurrently.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use futures_util::future::join_all;

use dltrack_core::TransferRequest;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::manifest::{self, ManifestEntry};
use crate::presentation::ProgressBoard;

/// Execute the batch command.
pub async fn execute(ctx: &CliContext, manifest_path: &Path, poll_ms: u64) -> Result<()> {
    let entries = manifest::load(manifest_path)?;
    let total = entries.len();
    let poll = Duration::from_millis(poll_ms);

    tracing::debug!(manifest = %manifest_path.display(), entries = total, "Starting batch");

    let board = ProgressBoard::new();
    let runs = entries
        .into_iter()
        .map(|entry| run_entry(ctx, &board, entry, poll));
    let outcomes = join_all(runs).await;

    let failed = outcomes.iter().filter(|ok| !**ok).count();
    println!("{} of {total} downloads completed", total - failed);

    if failed > 0 {
        return Err(CliError::Batch { failed, total }.into());
    }
    Ok(())
}

async fn run_entry(
    ctx: &CliContext,
    board: &ProgressBoard,
    entry: ManifestEntry,
    poll: Duration,
) -> bool {
    let ManifestEntry { url, dest, token } = entry;
    let mut bar = board.add(&token);

    let request = TransferRequest::new(url, dest).with_token(token.clone());
    let result = super::track(ctx.tracker.as_ref(), request, &mut bar, poll).await;
    ctx.tracker.release(&token).await;

    if let Err(error) = &result {
        tracing::debug!(token = %token, %error, "Batch entry failed");
    }
    result.is_ok()
}
