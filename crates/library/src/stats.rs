//! Reading statistics over finished books

use serde::{Deserialize, Serialize};
use shelfmate_core::{Book, BookState};
use std::collections::BTreeMap;

/// Aggregated counts over the books in the `Read` state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingStats {
    pub total_read: usize,
    pub total_pages: u64,
    pub rated_count: usize,
    pub rating_total: f64,
    /// Finishing year to count
    pub by_year: BTreeMap<i32, usize>,
    /// Finishing month (1-12) to count, across all years
    pub by_month: BTreeMap<u32, usize>,
    /// A book with several authors counts once for each of them
    pub by_author: BTreeMap<String, usize>,
    /// Format tag to count; untagged books are counted in `untagged` only
    pub by_format: BTreeMap<String, usize>,
    pub untagged: usize,
    pub shortest: Option<Book>,
    pub longest: Option<Book>,
}

impl ReadingStats {
    /// Creates empty statistics
    pub fn empty() -> Self {
        Self {
            total_read: 0,
            total_pages: 0,
            rated_count: 0,
            rating_total: 0.0,
            by_year: BTreeMap::new(),
            by_month: BTreeMap::new(),
            by_author: BTreeMap::new(),
            by_format: BTreeMap::new(),
            untagged: 0,
            shortest: None,
            longest: None,
        }
    }

    /// Aggregates the read books of a collection, keeping format tags as written
    pub fn from_books(books: &[Book]) -> Self {
        Self::from_books_with_formats(books, &[])
    }

    /// Aggregates the read books of a collection
    ///
    /// Format tags matching an entry of `known_formats` (ignoring case) are
    /// counted under that entry's spelling.
    pub fn from_books_with_formats(books: &[Book], known_formats: &[String]) -> Self {
        let mut stats = Self::empty();

        for book in books.iter().filter(|b| b.state == BookState::Read) {
            stats.record(book, known_formats);
        }

        stats
    }

    fn record(&mut self, book: &Book, known_formats: &[String]) {
        self.total_read += 1;

        if let Some(year) = book.read_year() {
            *self.by_year.entry(year).or_default() += 1;
        }
        if let Some(month) = book.read_month() {
            *self.by_month.entry(month).or_default() += 1;
        }

        for author in &book.authors {
            *self.by_author.entry(author.clone()).or_default() += 1;
        }

        match book.format.as_deref() {
            Some(tag) => {
                *self
                    .by_format
                    .entry(canonical_format(tag, known_formats))
                    .or_default() += 1;
            }
            None => self.untagged += 1,
        }

        if let Some(rating) = book.rating {
            self.rated_count += 1;
            self.rating_total += f64::from(rating);
        }

        if let Some(pages) = book.page_count {
            self.total_pages += u64::from(pages);

            // Strict comparisons keep the first book on ties
            let shorter = self
                .shortest
                .as_ref()
                .and_then(|b| b.page_count)
                .map_or(true, |current| pages < current);
            if shorter {
                self.shortest = Some(book.clone());
            }

            let longer = self
                .longest
                .as_ref()
                .and_then(|b| b.page_count)
                .map_or(true, |current| pages > current);
            if longer {
                self.longest = Some(book.clone());
            }
        }
    }

    /// Mean rating over rated read books
    pub fn average_rating(&self) -> Option<f64> {
        if self.rated_count == 0 {
            return None;
        }
        Some(self.rating_total / self.rated_count as f64)
    }

    /// Average page count over read books
    pub fn average_pages(&self) -> f64 {
        if self.total_read == 0 {
            return 0.0;
        }
        self.total_pages as f64 / self.total_read as f64
    }

    /// Year with the most finished books, earliest year on ties
    pub fn busiest_year(&self) -> Option<(i32, usize)> {
        self.by_year
            .iter()
            .fold(None, |best: Option<(i32, usize)>, (&year, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((year, count)),
            })
    }

    /// Authors with the most finished books, ties in name order
    pub fn top_authors(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut authors: Vec<(&str, usize)> = self
            .by_author
            .iter()
            .map(|(name, &count)| (name.as_str(), count))
            .collect();
        authors.sort_by(|a, b| b.1.cmp(&a.1));
        authors.truncate(limit);
        authors
    }

    pub fn has_history(&self) -> bool {
        self.total_read > 0
    }
}

impl Default for ReadingStats {
    fn default() -> Self {
        Self::empty()
    }
}

fn canonical_format(tag: &str, known_formats: &[String]) -> String {
    known_formats
        .iter()
        .find(|known| known.eq_ignore_ascii_case(tag))
        .cloned()
        .unwrap_or_else(|| tag.to_string())
}
