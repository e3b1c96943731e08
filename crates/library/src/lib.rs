//! Shelfmate book list logic
//!
//! Pure transformations over in-memory book collections:
//! - `filter` / `sort` / `pipeline`: the filtered, ordered list shown to the user
//! - `queue`: priority maintenance for the pending (to-read) queue
//! - `stats`: reading statistics over finished books
//!
//! # Example
//!
//! ```rust
//! use shelfmate_core::{Book, BookState};
//! use shelfmate_library::{apply, FilterParams, SortKey, SortParams};
//!
//! let mut dune = Book::new("1");
//! dune.title = Some("Dune".to_string());
//! dune.set_state(BookState::Read);
//!
//! let filters = FilterParams::new().with_state(BookState::Read).with_query("dune");
//! let visible = apply(&[dune], &filters, &SortParams::ascending(SortKey::Title));
//! assert_eq!(visible.len(), 1);
//! ```

pub mod error;
pub mod filter;
pub mod pipeline;
pub mod queue;
pub mod sort;
pub mod stats;

pub use error::{LibraryError, LibraryResult};
pub use filter::FilterParams;
pub use pipeline::{apply, BookListView};
pub use queue::{enqueue_last, move_in_queue, next_priority, pending_queue, renumber};
pub use sort::{SortKey, SortParams};
pub use stats::ReadingStats;
