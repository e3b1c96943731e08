//! Sync state and results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shelfmate_core::BookId;

/// Sync state for tracking progress
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncState {
    /// When the last successful sync finished
    pub last_sync: Option<DateTime<Utc>>,
    /// Whether sync is currently in progress
    pub in_progress: bool,
    /// Number of successful syncs since the engine started
    pub completed_syncs: u64,
    /// Books pushed by the last sync
    pub last_pushed: usize,
    /// Books removed by the last sync
    pub last_removed: usize,
}

impl SyncState {
    /// Creates a new sync state
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a sync has ever completed
    pub fn has_synced(&self) -> bool {
        self.last_sync.is_some()
    }
}

/// Outcome of one sync run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Books pushed to the store
    pub pushed: Vec<BookId>,
    /// Books deleted from the store
    pub removed: Vec<BookId>,
    /// True when the changes were computed but not applied
    pub dry_run: bool,
    pub finished_at: DateTime<Utc>,
}

impl SyncReport {
    /// Returns true when the store already matched the local collection
    pub fn is_noop(&self) -> bool {
        self.pushed.is_empty() && self.removed.is_empty()
    }

    pub fn total_changes(&self) -> usize {
        self.pushed.len() + self.removed.len()
    }
}
