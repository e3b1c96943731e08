//! Main sync engine

use crate::error::{SyncError, SyncResult};
use crate::reconcile::{reconcile, Reconciliation};
use crate::store::BookStore;
use crate::types::{SyncReport, SyncState};
use chrono::Utc;
use shelfmate_core::Book;
use std::sync::{Arc, Mutex, MutexGuard};

/// Configuration for the sync engine
#[derive(Debug, Clone, Default)]
pub struct SyncConfig {
    /// Compute changes without touching the store
    pub dry_run: bool,
}

impl SyncConfig {
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }
}

/// Pushes a local collection to a remote store
///
/// Clones share the same state, so an in-flight sync on one clone blocks
/// syncs started through another.
#[derive(Debug, Clone)]
pub struct SyncEngine {
    config: SyncConfig,
    state: Arc<Mutex<SyncState>>,
}

impl SyncEngine {
    /// Creates a new sync engine
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            state: Arc::new(Mutex::new(SyncState::new())),
        }
    }

    fn lock_state(&self) -> SyncResult<MutexGuard<'_, SyncState>> {
        self.state
            .lock()
            .map_err(|_| SyncError::Custom("Lock poisoned".to_string()))
    }

    /// Computes the changes a sync would make, without applying them
    pub fn plan<S: BookStore>(&self, local: &[Book], store: &S) -> SyncResult<Reconciliation> {
        let remote = store.fetch_all()?;
        Ok(reconcile(local, &remote))
    }

    /// Makes the store hold exactly the identifiers of `local`
    pub fn sync<S: BookStore>(&self, local: &[Book], store: &mut S) -> SyncResult<SyncReport> {
        // Mark sync as in progress
        {
            let mut state = self.lock_state()?;
            if state.in_progress {
                return Err(SyncError::InProgress);
            }
            state.in_progress = true;
        }

        let result = self.run(local, store);

        let mut state = self.lock_state()?;
        state.in_progress = false;

        match &result {
            Ok(report) => {
                state.completed_syncs += 1;
                state.last_pushed = report.pushed.len();
                state.last_removed = report.removed.len();
                if !report.dry_run {
                    state.last_sync = Some(report.finished_at);
                }
                log::info!(
                    "Sync finished: {} pushed, {} removed{}",
                    report.pushed.len(),
                    report.removed.len(),
                    if report.dry_run { " (dry run)" } else { "" }
                );
            }
            Err(e) => log::warn!("Sync failed: {}", e),
        }

        result
    }

    fn run<S: BookStore>(&self, local: &[Book], store: &mut S) -> SyncResult<SyncReport> {
        let plan = self.plan(local, store)?;
        let pushed = plan.added_ids();
        let removed = plan.removed_ids();

        if !self.config.dry_run {
            for book in plan.to_add {
                log::debug!("Pushing {}", book.id);
                store.insert(book)?;
            }
            for book in &plan.to_remove {
                log::debug!("Removing {}", book.id);
                store.remove(&book.id)?;
            }
            store.flush()?;
        }

        Ok(SyncReport {
            pushed,
            removed,
            dry_run: self.config.dry_run,
            finished_at: Utc::now(),
        })
    }

    /// Gets the current sync state
    pub fn state(&self) -> SyncResult<SyncState> {
        self.lock_state().map(|s| s.clone())
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }
}

impl Default for SyncEngine {
    fn default() -> Self {
        Self::new(SyncConfig::default())
    }
}
