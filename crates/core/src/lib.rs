//! Core domain model for Shelfmate
//!
//! Defines the book record shared by the list pipeline, the statistics
//! aggregator and the sync engine.

pub mod error;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use types::{Book, BookId, BookState, Validator, AUTHOR_SEPARATOR};
