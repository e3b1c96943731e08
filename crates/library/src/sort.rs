//! Book list ordering

use crate::error::LibraryError;
use serde::{Deserialize, Serialize};
use shelfmate_core::Book;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Field that drives the primary order of a non-pending list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Title,
    Author,
    Rating,
    PageCount,
    PublishedDate,
    ReadDate,
    Id,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        Self::Title,
        Self::Author,
        Self::Rating,
        Self::PageCount,
        Self::PublishedDate,
        Self::ReadDate,
        Self::Id,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Rating => "rating",
            Self::PageCount => "pageCount",
            Self::PublishedDate => "publishedDate",
            Self::ReadDate => "readDate",
            Self::Id => "id",
        }
    }

    /// Parses a key name, falling back to `Id` for names it does not know
    ///
    /// The fallback is logged so a misspelled key in a saved preference shows
    /// up instead of silently ordering by identifier.
    pub fn from_name_lossy(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::warn!("Unknown sort key '{}', ordering by id", name);
            Self::Id
        })
    }

    /// Compares two books on this key alone, absent values first
    pub fn compare(&self, a: &Book, b: &Book) -> Ordering {
        match self {
            Self::Title => a
                .title_or_empty()
                .to_lowercase()
                .cmp(&b.title_or_empty().to_lowercase())
                .then_with(|| a.title.is_some().cmp(&b.title.is_some())),
            Self::Author => a
                .authors_joined()
                .to_lowercase()
                .cmp(&b.authors_joined().to_lowercase()),
            Self::Rating => compare_ratings(a.rating, b.rating),
            Self::PageCount => a.page_count.cmp(&b.page_count),
            Self::PublishedDate => a.published_date.cmp(&b.published_date),
            Self::ReadDate => a.read_date.cmp(&b.read_date),
            Self::Id => a.id.cmp(&b.id),
        }
    }
}

fn compare_ratings(a: Option<f32>, b: Option<f32>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "author" | "authors" => Ok(Self::Author),
            "rating" => Ok(Self::Rating),
            "pages" | "pagecount" | "page_count" => Ok(Self::PageCount),
            "published" | "publisheddate" | "published_date" => Ok(Self::PublishedDate),
            "read" | "readdate" | "read_date" => Ok(Self::ReadDate),
            "id" => Ok(Self::Id),
            _ => Err(LibraryError::UnknownSortKey(s.to_string())),
        }
    }
}

/// User-adjustable ordering of a list view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortParams {
    pub key: SortKey,
    pub descending: bool,
}

impl SortParams {
    pub fn new(key: SortKey, descending: bool) -> Self {
        Self { key, descending }
    }

    pub fn ascending(key: SortKey) -> Self {
        Self::new(key, false)
    }

    pub fn descending(key: SortKey) -> Self {
        Self::new(key, true)
    }

    /// Full comparator for a list
    ///
    /// The pending queue orders by priority first and is never reversed.
    /// Every other list orders by the key first, then priority, and reverses
    /// the whole order when descending.
    pub fn compare(&self, a: &Book, b: &Book, pending_list: bool) -> Ordering {
        if pending_list {
            return a
                .priority
                .cmp(&b.priority)
                .then_with(|| self.key.compare(a, b));
        }

        let ordering = self
            .key
            .compare(a, b)
            .then_with(|| a.priority.cmp(&b.priority));

        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }

    /// Stable in-place sort
    pub fn sort(&self, books: &mut [Book], pending_list: bool) {
        books.sort_by(|a, b| self.compare(a, b, pending_list));
    }
}
