//! Filter-then-sort pipeline behind every book list

use crate::filter::FilterParams;
use crate::sort::{SortKey, SortParams};
use shelfmate_core::Book;

/// Produces the ordered, filtered view of a collection
///
/// Criteria run in a fixed order (format, state, query, author, year,
/// month) and the survivors are stable-sorted. Input books are never
/// modified and no book outside `books` can appear in the result.
pub fn apply(books: &[Book], filters: &FilterParams, sort: &SortParams) -> Vec<Book> {
    let mut visible: Vec<Book> = books
        .iter()
        .filter(|book| filters.matches_format(book))
        .filter(|book| filters.matches_state(book))
        .filter(|book| filters.matches_query(book))
        .filter(|book| filters.matches_author(book))
        .filter(|book| filters.matches_year(book))
        .filter(|book| filters.matches_month(book))
        .cloned()
        .collect();

    sort.sort(&mut visible, filters.is_pending_list());

    log::debug!(
        "Book list: {} of {} books visible, sorted by {}{}",
        visible.len(),
        books.len(),
        sort.key,
        if sort.descending { " (desc)" } else { "" }
    );

    visible
}

/// A book list with fixed filters and a live sort order
#[derive(Debug, Clone)]
pub struct BookListView {
    filters: FilterParams,
    sort: SortParams,
}

impl BookListView {
    pub fn new(filters: FilterParams, sort: SortParams) -> Self {
        Self { filters, sort }
    }

    pub fn filters(&self) -> &FilterParams {
        &self.filters
    }

    pub fn sort(&self) -> SortParams {
        self.sort
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort.key = key;
    }

    pub fn set_descending(&mut self, descending: bool) {
        self.sort.descending = descending;
    }

    pub fn toggle_descending(&mut self) {
        self.sort.descending = !self.sort.descending;
    }

    /// True when the view shows the pending queue, where descending has no effect
    pub fn is_pending_list(&self) -> bool {
        self.filters.is_pending_list()
    }

    pub fn render(&self, books: &[Book]) -> Vec<Book> {
        apply(books, &self.filters, &self.sort)
    }
}
