//! Token → record registry.
//!
//! Each registration mints a lease. Updates carry the lease of the download
//! that produced them, so a released token that is re-used by a newer
//! download is never touched by the older one.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use dltrack_core::{DownloadError, DownloadRecord, DownloadResult};

/// Lease ID binding a record to the download that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct LeaseId(u64);

struct Entry {
    lease: LeaseId,
    record: DownloadRecord,
}

/// Owned registry of tracked downloads.
pub(crate) struct Registry {
    entries: RwLock<HashMap<String, Entry>>,
    lease_counter: AtomicU64,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            lease_counter: AtomicU64::new(0),
        }
    }

    /// Register a fresh record for `token`.
    ///
    /// Fails if the token is already tracked; the existing record is untouched.
    pub(crate) async fn register(&self, token: &str) -> DownloadResult<LeaseId> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(token) {
            return Err(DownloadError::already_tracked(token));
        }

        let lease = LeaseId(self.lease_counter.fetch_add(1, Ordering::Relaxed));
        entries.insert(
            token.to_string(),
            Entry {
                lease,
                record: DownloadRecord::new(token),
            },
        );
        Ok(lease)
    }

    /// Apply `f` to the record if it still belongs to `lease`.
    ///
    /// Returns `None` when the record was released (or replaced).
    pub(crate) async fn update<R>(
        &self,
        token: &str,
        lease: LeaseId,
        f: impl FnOnce(&mut DownloadRecord) -> R,
    ) -> Option<R> {
        let mut entries = self.entries.write().await;
        entries
            .get_mut(token)
            .filter(|entry| entry.lease == lease)
            .map(|entry| f(&mut entry.record))
    }

    pub(crate) async fn snapshot(&self, token: &str) -> Option<DownloadRecord> {
        let entries = self.entries.read().await;
        entries.get(token).map(|entry| entry.record.clone())
    }

    /// Remove the record for `token`. Returns whether one existed.
    pub(crate) async fn release(&self, token: &str) -> bool {
        self.entries.write().await.remove(token).is_some()
    }

    pub(crate) async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
