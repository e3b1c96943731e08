//! Identity-based reconciliation between a local and a remote snapshot

use shelfmate_core::{Book, BookId};
use std::collections::HashSet;

/// Changes needed to make the remote store match the local collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// Local books missing remotely, in local order
    pub to_add: Vec<Book>,
    /// Remote books missing locally, in remote order
    pub to_remove: Vec<Book>,
}

impl Reconciliation {
    /// Returns true when the two snapshots already hold the same identifiers
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    pub fn total_changes(&self) -> usize {
        self.to_add.len() + self.to_remove.len()
    }

    pub fn added_ids(&self) -> Vec<BookId> {
        self.to_add.iter().map(|b| b.id.clone()).collect()
    }

    pub fn removed_ids(&self) -> Vec<BookId> {
        self.to_remove.iter().map(|b| b.id.clone()).collect()
    }
}

/// Computes which books to push and which to delete remotely
///
/// Books present on both sides are left alone even if their fields differ;
/// only identifier presence is compared.
pub fn reconcile(local: &[Book], remote: &[Book]) -> Reconciliation {
    let local_ids: HashSet<&BookId> = local.iter().map(|b| &b.id).collect();
    let remote_ids: HashSet<&BookId> = remote.iter().map(|b| &b.id).collect();

    let to_add = local
        .iter()
        .filter(|b| !remote_ids.contains(&b.id))
        .cloned()
        .collect();

    let to_remove = remote
        .iter()
        .filter(|b| !local_ids.contains(&b.id))
        .cloned()
        .collect();

    Reconciliation { to_add, to_remove }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn books(ids: &[&str]) -> Vec<Book> {
        ids.iter().map(|id| Book::new(*id)).collect()
    }

    fn ids(books: &[Book]) -> Vec<&str> {
        books.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_add_and_remove() {
        let result = reconcile(&books(&["a", "b"]), &books(&["b", "c"]));
        assert_eq!(ids(&result.to_add), vec!["a"]);
        assert_eq!(ids(&result.to_remove), vec!["c"]);
        assert_eq!(result.total_changes(), 2);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(reconcile(&[], &[]).is_empty());

        let push_all = reconcile(&books(&["a", "b"]), &[]);
        assert_eq!(ids(&push_all.to_add), vec!["a", "b"]);
        assert!(push_all.to_remove.is_empty());

        let wipe_remote = reconcile(&[], &books(&["x"]));
        assert!(wipe_remote.to_add.is_empty());
        assert_eq!(ids(&wipe_remote.to_remove), vec!["x"]);
    }

    #[test]
    fn test_field_edits_are_not_propagated() {
        let mut local = Book::new("a");
        local.title = Some("Edited".to_string());
        let remote = Book::new("a");

        assert!(reconcile(&[local], &[remote]).is_empty());
    }

    #[test]
    fn test_to_add_carries_the_local_record() {
        let mut local = Book::new("a");
        local.title = Some("Local title".to_string());

        let result = reconcile(&[local.clone()], &[]);
        assert_eq!(result.to_add, vec![local]);
    }

    #[test]
    fn test_result_ids() {
        let result = reconcile(&books(&["a"]), &books(&["z"]));
        assert_eq!(result.added_ids(), vec![BookId::from("a")]);
        assert_eq!(result.removed_ids(), vec![BookId::from("z")]);
    }
}
