//! Pending queue ordering
//!
//! Priorities are only meaningful among pending books. These helpers keep
//! them contiguous (0, 1, 2, ...) so the queue order is exactly the user's
//! chosen reading order.

use crate::error::{LibraryError, LibraryResult};
use shelfmate_core::{Book, BookId};

/// Indices of pending books in queue order (stable on equal priorities)
fn queue_indices(books: &[Book]) -> Vec<usize> {
    let mut indices: Vec<usize> = books
        .iter()
        .enumerate()
        .filter(|(_, book)| book.is_pending())
        .map(|(i, _)| i)
        .collect();
    indices.sort_by_key(|&i| books[i].priority);
    indices
}

fn assign_positions(books: &mut [Book], ordered: &[usize]) {
    for (position, &index) in ordered.iter().enumerate() {
        books[index].priority = position as i32;
    }
}

/// Returns the pending books in queue order
pub fn pending_queue(books: &[Book]) -> Vec<&Book> {
    queue_indices(books).into_iter().map(|i| &books[i]).collect()
}

/// Priority that places a newly queued book at the end of the queue
pub fn next_priority(books: &[Book]) -> i32 {
    books
        .iter()
        .filter(|book| book.is_pending())
        .map(|book| book.priority.saturating_add(1))
        .max()
        .unwrap_or(0)
}

/// Reassigns contiguous priorities to pending books, keeping their order
pub fn renumber(books: &mut [Book]) {
    let ordered = queue_indices(books);
    assign_positions(books, &ordered);
}

/// Queues the book with `id` behind every other pending book
///
/// Priorities are renumbered first, so the result does not depend on how
/// large the stored priorities are. A book that is already pending moves
/// to the end. Returns the book's new priority.
pub fn enqueue_last(books: &mut [Book], id: &BookId) -> LibraryResult<i32> {
    renumber(books);

    // One past the highest renumbered priority, even when the book itself is pending
    let past_end = books.iter().filter(|book| book.is_pending()).count();
    let past_end = i32::try_from(past_end).unwrap_or(i32::MAX);

    let book = books
        .iter_mut()
        .find(|book| book.id == *id)
        .ok_or_else(|| LibraryError::UnknownBook(id.to_string()))?;
    book.enqueue(past_end);

    renumber(books);

    let priority = books
        .iter()
        .find(|book| book.id == *id)
        .map_or(past_end, |book| book.priority);
    log::debug!("Queued {} at position {}", id, priority);
    Ok(priority)
}

/// Moves a pending book to `new_position` in the queue and renumbers
pub fn move_in_queue(books: &mut [Book], id: &BookId, new_position: usize) -> LibraryResult<()> {
    let mut ordered = queue_indices(books);

    let current = ordered
        .iter()
        .position(|&i| books[i].id == *id)
        .ok_or_else(|| LibraryError::NotInQueue(id.to_string()))?;

    if new_position >= ordered.len() {
        return Err(LibraryError::PositionOutOfRange {
            position: new_position,
            len: ordered.len(),
        });
    }

    let index = ordered.remove(current);
    ordered.insert(new_position, index);
    assign_positions(books, &ordered);

    log::debug!("Moved {} from queue position {} to {}", id, current, new_position);
    Ok(())
}
