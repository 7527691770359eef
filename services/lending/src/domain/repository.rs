use std::future::Future;
use std::sync::Arc;

use shelf_domain::book::Book;
use shelf_domain::id::BookId;

use crate::error::LendingError;

/// Storage port for book records.
///
/// The store serializes its own per-record reads and writes; nothing here
/// makes a load followed by a save atomic. Futures are `Send` so store calls
/// can run inside deferred tasks on the runtime.
pub trait BookStore: Send + Sync + 'static {
    /// Produce an identifier no stored or future book will share.
    fn generate_id(&self) -> impl Future<Output = Result<BookId, LendingError>> + Send;

    /// Insert or overwrite the record keyed by `book.id()`.
    fn create(&self, book: &Book) -> impl Future<Output = Result<(), LendingError>> + Send;

    fn list_all(&self) -> impl Future<Output = Result<Vec<Book>, LendingError>> + Send;

    fn find_by_title(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<Vec<Book>, LendingError>> + Send;

    fn find_by_id(
        &self,
        id: BookId,
    ) -> impl Future<Output = Result<Option<Book>, LendingError>> + Send;

    /// Delete a record. Returns `true` if a record was removed.
    fn delete_by_id(&self, id: BookId) -> impl Future<Output = Result<bool, LendingError>> + Send;
}

/// A shared store is still a store, so callers can keep a handle next to the service.
impl<S: BookStore> BookStore for Arc<S> {
    fn generate_id(&self) -> impl Future<Output = Result<BookId, LendingError>> + Send {
        (**self).generate_id()
    }

    fn create(&self, book: &Book) -> impl Future<Output = Result<(), LendingError>> + Send {
        (**self).create(book)
    }

    fn list_all(&self) -> impl Future<Output = Result<Vec<Book>, LendingError>> + Send {
        (**self).list_all()
    }

    fn find_by_title(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<Vec<Book>, LendingError>> + Send {
        (**self).find_by_title(title)
    }

    fn find_by_id(
        &self,
        id: BookId,
    ) -> impl Future<Output = Result<Option<Book>, LendingError>> + Send {
        (**self).find_by_id(id)
    }

    fn delete_by_id(&self, id: BookId) -> impl Future<Output = Result<bool, LendingError>> + Send {
        (**self).delete_by_id(id)
    }
}
