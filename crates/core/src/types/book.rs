//! Book domain model

use crate::error::{CoreError, CoreResult};
use crate::types::{BookState, Validator};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Separator used when an author list is flattened into one string
pub const AUTHOR_SEPARATOR: &str = ", ";

/// Unique identifier for a book
///
/// Identifiers come from several sources (generated locally, imported from a
/// catalogue lookup, read back from the remote store), so the inner value is
/// an arbitrary string rather than a parsed UUID.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    /// Creates a new random BookId
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the BookId as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BookId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A book in the user's collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub published_date: Option<NaiveDate>,
    /// Date the book was finished
    #[serde(default)]
    pub read_date: Option<NaiveDate>,
    #[serde(default)]
    pub page_count: Option<u32>,
    /// 0-10
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub state: BookState,
    #[serde(default)]
    pub format: Option<String>,
    /// Queue position, only meaningful while `state` is pending
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
}

impl Book {
    /// Creates an empty book with the given identifier
    pub fn new(id: impl Into<BookId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            authors: Vec::new(),
            published_date: None,
            read_date: None,
            page_count: None,
            rating: None,
            categories: Vec::new(),
            state: BookState::New,
            format: None,
            priority: 0,
            description: None,
            isbn: None,
        }
    }

    /// Creates a book with a fresh random identifier and a title
    pub fn with_title(title: impl Into<String>) -> Self {
        let mut book = Self::new(BookId::new());
        book.title = Some(title.into());
        book
    }

    /// Returns the title, or an empty string when it is missing
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Returns every author joined into a single string
    pub fn authors_joined(&self) -> String {
        self.authors.join(AUTHOR_SEPARATOR)
    }

    /// Returns the first listed author, if any
    pub fn primary_author(&self) -> Option<&str> {
        self.authors.first().map(String::as_str)
    }

    /// Year the book was finished
    pub fn read_year(&self) -> Option<i32> {
        self.read_date.map(|d| d.year())
    }

    /// Month (1-12) the book was finished
    pub fn read_month(&self) -> Option<u32> {
        self.read_date.map(|d| d.month())
    }

    pub fn is_pending(&self) -> bool {
        self.state == BookState::Pending
    }

    /// Changes the lifecycle state
    ///
    /// Leaving the pending state resets the priority so stale queue positions
    /// never leak into other lists.
    pub fn set_state(&mut self, state: BookState) {
        if state != BookState::Pending {
            self.priority = 0;
        }
        self.state = state;
    }

    /// Puts the book in the pending queue at the given priority
    pub fn enqueue(&mut self, priority: i32) {
        self.state = BookState::Pending;
        self.priority = priority;
    }

    /// Marks the book as read on the given date
    pub fn mark_read(&mut self, date: NaiveDate) {
        self.set_state(BookState::Read);
        self.read_date = Some(date);
    }

    /// Validates the book, converting failures into a `CoreError`
    pub fn ensure_valid(&self) -> CoreResult<()> {
        self.validate()
            .map_err(|errors| CoreError::invalid_book(self.id.as_str(), errors))
    }
}

impl Validator for Book {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.id.as_str().trim().is_empty() {
            errors.push("Book id cannot be empty".to_string());
        }

        if let Some(rating) = self.rating {
            if !(0.0..=10.0).contains(&rating) {
                errors.push("Rating must be between 0 and 10".to_string());
            }
        }

        if self.page_count == Some(0) {
            errors.push("Page count must be greater than zero".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
