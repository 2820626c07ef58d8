//! `get` command: download one file.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use dltrack_core::TransferRequest;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::ProgressBoard;

/// Token used when none is given: the destination's file name.
pub fn default_token(dest: &Path) -> String {
    dest.file_name().map_or_else(
        || dest.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Execute the get command.
pub async fn execute(
    ctx: &CliContext,
    url: &str,
    dest: &Path,
    token: Option<String>,
    poll_ms: u64,
) -> Result<()> {
    let token = token.unwrap_or_else(|| default_token(dest));
    let request = TransferRequest::new(url, dest).with_token(token.clone());

    let board = ProgressBoard::new();
    let mut bar = board.add(&token);

    let result = super::track(
        ctx.tracker.as_ref(),
        request,
        &mut bar,
        Duration::from_millis(poll_ms),
    )
    .await;
    ctx.tracker.release(&token).await;

    result.map_err(CliError::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_token_is_file_name() {
        assert_eq!(default_token(Path::new("/tmp/out/model.bin")), "model.bin");
        assert_eq!(default_token(Path::new("/")), "/");
    }
}
