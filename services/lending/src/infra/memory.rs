use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use shelf_domain::book::Book;
use shelf_domain::id::BookId;

use crate::domain::repository::BookStore;
use crate::error::LendingError;

/// Process-local `BookStore` keyed by id.
///
/// - ids count up from 1 and are never reused, even after deletion
/// - `list_all` returns books in id order
/// - `find_by_title` is a case-insensitive substring match
#[derive(Debug)]
pub struct InMemoryBookStore {
    books: Mutex<BTreeMap<BookId, Book>>,
    next_id: AtomicU64,
}

impl Default for InMemoryBookStore {
    fn default() -> Self {
        Self {
            books: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store. The id counter starts past the highest seeded id.
    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        let books: BTreeMap<BookId, Book> = books.into_iter().map(|b| (b.id(), b)).collect();
        let next_id = books.keys().next_back().map_or(1, |id| id.0.saturating_add(1));
        Self {
            books: Mutex::new(books),
            next_id: AtomicU64::new(next_id),
        }
    }

    pub fn len(&self) -> usize {
        self.books().len()
    }

    pub fn is_empty(&self) -> bool {
        self.books().is_empty()
    }

    fn books(&self) -> MutexGuard<'_, BTreeMap<BookId, Book>> {
        self.books.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BookStore for InMemoryBookStore {
    async fn generate_id(&self) -> Result<BookId, LendingError> {
        Ok(BookId(self.next_id.fetch_add(1, Ordering::Relaxed)))
    }

    async fn create(&self, book: &Book) -> Result<(), LendingError> {
        self.books().insert(book.id(), book.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Book>, LendingError> {
        Ok(self.books().values().cloned().collect())
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Book>, LendingError> {
        let needle = title.to_lowercase();
        Ok(self
            .books()
            .values()
            .filter(|b| b.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, LendingError> {
        Ok(self.books().get(&id).cloned())
    }

    async fn delete_by_id(&self, id: BookId) -> Result<bool, LendingError> {
        Ok(self.books().remove(&id).is_some())
    }
}
