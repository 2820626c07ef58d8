//! Batch manifest loading.
//!
//! A manifest is a JSON array of `{ "url", "dest", "token"? }` objects.
//! Entries without a token get `entry-<index>` so every entry is pollable.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::CliError;

/// One download of a batch, with its token resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Source URL.
    pub url: String,
    /// Destination file path.
    pub dest: PathBuf,
    /// Tracking token.
    pub token: String,
}

#[derive(Deserialize)]
struct RawEntry {
    url: String,
    dest: PathBuf,
    #[serde(default)]
    token: Option<String>,
}

/// Read and validate a manifest file.
pub fn load(path: &Path) -> Result<Vec<ManifestEntry>, CliError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    parse(&raw)
}

/// Parse and validate manifest JSON.
pub fn parse(raw: &str) -> Result<Vec<ManifestEntry>, CliError> {
    let raw_entries: Vec<RawEntry> = serde_json::from_str(raw)
        .map_err(|e| CliError::Arguments(format!("malformed manifest: {e}")))?;

    if raw_entries.is_empty() {
        return Err(CliError::Arguments("manifest has no entries".to_string()));
    }

    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(raw_entries.len());
    for (index, RawEntry { url, dest, token }) in raw_entries.into_iter().enumerate() {
        let token = token.unwrap_or_else(|| format!("entry-{index}"));
        if !seen.insert(token.clone()) {
            return Err(CliError::Arguments(format!(
                "duplicate token '{token}' in manifest"
            )));
        }
        entries.push(ManifestEntry { url, dest, token });
    }

    Ok(entries)
}
