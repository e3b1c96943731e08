//! Remote book stores

use crate::error::{SyncError, SyncResult};
use shelfmate_core::{Book, BookId};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A store the sync engine can push books to and delete books from
pub trait BookStore {
    /// Returns a snapshot of every book in the store
    fn fetch_all(&self) -> SyncResult<Vec<Book>>;

    /// Adds a book; an existing book with the same id is replaced
    fn insert(&mut self, book: Book) -> SyncResult<()>;

    /// Deletes a book; unknown ids are ignored
    fn remove(&mut self, id: &BookId) -> SyncResult<()>;

    /// Makes previous writes durable
    fn flush(&mut self) -> SyncResult<()> {
        Ok(())
    }
}

/// Store kept entirely in memory, preserving insertion order
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    books: Vec<Book>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl BookStore for InMemoryStore {
    fn fetch_all(&self) -> SyncResult<Vec<Book>> {
        Ok(self.books.clone())
    }

    fn insert(&mut self, book: Book) -> SyncResult<()> {
        match self.books.iter_mut().find(|b| b.id == book.id) {
            Some(existing) => *existing = book,
            None => self.books.push(book),
        }
        Ok(())
    }

    fn remove(&mut self, id: &BookId) -> SyncResult<()> {
        self.books.retain(|b| b.id != *id);
        Ok(())
    }
}

/// Reads a JSON array of books; a missing or blank file is an empty collection
pub fn load_books(path: &Path) -> SyncResult<Vec<Book>> {
    if !path.exists() {
        log::info!("No snapshot at {}, starting empty", path.display());
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(path).map_err(|e| SyncError::Snapshot {
        path: path.to_path_buf(),
        source: e,
    })?;

    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    Ok(serde_json::from_str(&contents)?)
}

/// Writes a JSON array of books through a temporary file and atomic rename
pub fn save_books(path: &Path, books: &[Book]) -> SyncResult<()> {
    let json = serde_json::to_string_pretty(books)?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let snapshot_error = |source: std::io::Error| SyncError::Snapshot {
        path: path.to_path_buf(),
        source,
    };

    let mut temp_file = NamedTempFile::new_in(dir).map_err(snapshot_error)?;
    temp_file
        .write_all(json.as_bytes())
        .map_err(snapshot_error)?;
    temp_file.flush().map_err(snapshot_error)?;
    temp_file
        .persist(path)
        .map_err(|e| snapshot_error(e.error))?;

    log::debug!("Wrote {} books to {}", books.len(), path.display());
    Ok(())
}

/// Store backed by a JSON snapshot file, written on `flush`
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: InMemoryStore,
    dirty: bool,
}

impl JsonFileStore {
    /// Opens the snapshot at `path`; the file is created on first flush
    pub fn open(path: impl Into<PathBuf>) -> SyncResult<Self> {
        let path = path.into();
        let books = load_books(&path)?;
        Ok(Self {
            path,
            inner: InMemoryStore::with_books(books),
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn books(&self) -> &[Book] {
        self.inner.books()
    }
}

impl BookStore for JsonFileStore {
    fn fetch_all(&self) -> SyncResult<Vec<Book>> {
        self.inner.fetch_all()
    }

    fn insert(&mut self, book: Book) -> SyncResult<()> {
        self.dirty = true;
        self.inner.insert(book)
    }

    fn remove(&mut self, id: &BookId) -> SyncResult<()> {
        self.dirty = true;
        self.inner.remove(id)
    }

    fn flush(&mut self) -> SyncResult<()> {
        if !self.dirty {
            return Ok(());
        }
        save_books(&self.path, self.inner.books())?;
        self.dirty = false;
        Ok(())
    }
}
