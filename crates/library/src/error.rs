use shelfmate_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("No book with id {0}")]
    UnknownBook(String),

    #[error("Book is not in the pending queue: {0}")]
    NotInQueue(String),

    #[error("Queue position {position} is out of range (queue length: {len})")]
    PositionOutOfRange { position: usize, len: usize },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type LibraryResult<T> = std::result::Result<T, LibraryError>;
