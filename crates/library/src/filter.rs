//! Book list filter criteria
//!
//! A `FilterParams` is fixed for the lifetime of a list view. Every active
//! criterion must hold for a book to pass; inactive criteria accept
//! everything.

use serde::{Deserialize, Serialize};
use shelfmate_core::{Book, BookState};

/// Criteria applied to the book list before sorting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    /// Case-insensitive substring of the title or the joined authors
    pub query: String,
    /// Exact lifecycle state, `None` accepts every state
    pub state: Option<BookState>,
    /// Exact format tag, `None` accepts every format
    pub format: Option<String>,
    /// Substring of the joined authors, `None` or empty accepts everything
    pub author: Option<String>,
    /// Year the book was finished, negative values disable the check
    pub year: Option<i32>,
    /// Month (1-12) the book was finished, other values disable the check
    pub month: Option<u32>,
}

impl FilterParams {
    /// Creates a fully permissive filter
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_state(mut self, state: BookState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Restricts to a finishing year; negative years clear the constraint
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = (year >= 0).then_some(year);
        self
    }

    /// Restricts to a finishing month; values outside 1-12 clear the constraint
    pub fn with_month(mut self, month: u32) -> Self {
        self.month = (1..=12).contains(&month).then_some(month);
        self
    }

    /// Returns true when the list is the pending queue
    pub fn is_pending_list(&self) -> bool {
        self.state == Some(BookState::Pending)
    }

    /// Returns true when no criterion is active
    pub fn is_permissive(&self) -> bool {
        self.query.is_empty()
            && self.state.is_none()
            && self.format.is_none()
            && self.author.as_deref().map_or(true, str::is_empty)
            && self.active_year().is_none()
            && self.active_month().is_none()
    }

    fn active_year(&self) -> Option<i32> {
        self.year.filter(|y| *y >= 0)
    }

    fn active_month(&self) -> Option<u32> {
        self.month.filter(|m| (1..=12).contains(m))
    }

    pub fn matches_format(&self, book: &Book) -> bool {
        match &self.format {
            Some(format) => book.format.as_deref() == Some(format.as_str()),
            None => true,
        }
    }

    pub fn matches_state(&self, book: &Book) -> bool {
        self.state.map_or(true, |state| book.state == state)
    }

    /// An absent title counts as the empty string
    pub fn matches_query(&self, book: &Book) -> bool {
        let query = self.query.to_lowercase();
        book.title_or_empty().to_lowercase().contains(&query)
            || book.authors_joined().to_lowercase().contains(&query)
    }

    pub fn matches_author(&self, book: &Book) -> bool {
        match self.author.as_deref() {
            Some(author) if !author.is_empty() => book.authors_joined().contains(author),
            _ => true,
        }
    }

    /// Books without a finishing date never match an active year
    pub fn matches_year(&self, book: &Book) -> bool {
        match self.active_year() {
            Some(year) => book.read_year() == Some(year),
            None => true,
        }
    }

    /// Books without a finishing date never match an active month
    pub fn matches_month(&self, book: &Book) -> bool {
        match self.active_month() {
            Some(month) => book.read_month() == Some(month),
            None => true,
        }
    }

    /// Checks every criterion in pipeline order
    pub fn matches(&self, book: &Book) -> bool {
        self.matches_format(book)
            && self.matches_state(book)
            && self.matches_query(book)
            && self.matches_author(book)
            && self.matches_year(book)
            && self.matches_month(book)
    }
}
