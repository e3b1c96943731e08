//! Domain types for Shelfmate
//!
//! - `book`: Book record and identifier
//! - `state`: Reading lifecycle state
//! - `common`: Shared traits

mod book;
mod common;
mod state;

pub use book::{Book, BookId, AUTHOR_SEPARATOR};
pub use common::Validator;
pub use state::BookState;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_types_are_exported() {
        let _id: BookId = BookId::new();
        let _book: Book = Book::new("1");
        let _state: BookState = BookState::Pending;
    }
}
