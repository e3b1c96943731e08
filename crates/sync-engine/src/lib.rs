//! Local-to-remote synchronization for the book collection
//!
//! The local collection is authoritative. A sync pushes local books the
//! remote store lacks and deletes remote books the local collection lacks,
//! matching purely on book identifiers.
//!
//! # Example
//!
//! ```rust
//! use shelfmate_core::Book;
//! use shelfmate_sync_engine::{InMemoryStore, SyncConfig, SyncEngine};
//!
//! let engine = SyncEngine::new(SyncConfig::default());
//! let mut remote = InMemoryStore::with_books(vec![Book::new("b"), Book::new("c")]);
//!
//! let report = engine
//!     .sync(&[Book::new("a"), Book::new("b")], &mut remote)
//!     .unwrap();
//! assert_eq!(report.pushed.len(), 1);
//! assert_eq!(report.removed.len(), 1);
//! ```

mod engine;
mod error;
mod reconcile;
mod store;
mod types;

pub use engine::{SyncConfig, SyncEngine};
pub use error::{SyncError, SyncResult};
pub use reconcile::{reconcile, Reconciliation};
pub use store::{load_books, save_books, BookStore, InMemoryStore, JsonFileStore};
pub use types::{SyncReport, SyncState};
