use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use shelf_core::config::Config;
use shelf_domain::book::{Book, NewBook};
use shelf_domain::id::BookId;
use shelf_domain::status::BookStatus;

use crate::config::LendingConfig;
use crate::domain::repository::BookStore;
use crate::domain::types::{BorrowOutcome, DeferredWrite};
use crate::error::LendingError;
use crate::infra::scheduler::DelayedTransitionScheduler;

/// Catalog and lending lifecycle over a [`BookStore`].
///
/// Every operation loads the book, checks its status, then saves it; the
/// load and the save are separate store calls, so two callers working on the
/// same id can interleave.
#[derive(Debug)]
pub struct LendingService<S: BookStore> {
    store: Arc<S>,
    scheduler: DelayedTransitionScheduler,
    deferred_write: DeferredWrite,
    return_delay: Duration,
}

impl<S: BookStore> LendingService<S> {
    pub fn new(store: S) -> Self {
        Self::from_config(store, &LendingConfig::default())
    }

    pub fn with_policy(store: S, deferred_write: DeferredWrite) -> Self {
        Self {
            deferred_write,
            ..Self::new(store)
        }
    }

    /// Startup entry point: read `LENDING_*`, install logging in the
    /// configured format, then build the service.
    pub fn from_env(store: S) -> Result<Self, envy::Error> {
        let config = LendingConfig::try_from_env()?;
        config.init_tracing();
        info!(
            return_delay_ms = config.return_delay_ms,
            deferred_write = ?config.deferred_write,
            "lending service configured"
        );
        Ok(Self::from_config(store, &config))
    }

    pub fn from_config(store: S, config: &LendingConfig) -> Self {
        Self {
            store: Arc::new(store),
            scheduler: DelayedTransitionScheduler::new(),
            deferred_write: config.deferred_write,
            return_delay: config.return_delay(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Register ─────────────────────────────────────────────────────────────

    #[instrument(skip(self), fields(title = %input.title))]
    pub async fn register(&self, input: NewBook) -> Result<Book, LendingError> {
        let id = self.store.generate_id().await?;
        let book = Book::register(id, input, Utc::now());
        self.store.create(&book).await?;
        info!(book_id = %id, "book registered");
        Ok(book)
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub async fn list_all(&self) -> Result<Vec<Book>, LendingError> {
        self.store.list_all().await
    }

    pub async fn find_by_title(&self, title: &str) -> Result<Vec<Book>, LendingError> {
        self.store.find_by_title(title).await
    }

    pub async fn find_by_id(&self, id: BookId) -> Result<Book, LendingError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(LendingError::BookNotFound(id))
    }

    // ── Borrow ───────────────────────────────────────────────────────────────

    /// Lend out an available book. Any other status is left as is and
    /// reported through [`BorrowOutcome::Unavailable`], not as an error.
    #[instrument(skip(self))]
    pub async fn borrow(&self, id: BookId) -> Result<BorrowOutcome, LendingError> {
        let mut book = self.find_by_id(id).await?;
        if !book.is_available_to_borrow() {
            debug!(status = %book.status(), "book not available, borrow ignored");
            return Ok(BorrowOutcome::Unavailable(book.status()));
        }
        book.to_borrowed();
        self.store.create(&book).await?;
        info!(book_id = %id, "book borrowed");
        Ok(BorrowOutcome::Borrowed(book))
    }

    // ── Return ───────────────────────────────────────────────────────────────

    /// Take back a borrowed or lost book. It is `ORGANIZING` on return and
    /// becomes `AVAILABLE` once `delay` has elapsed.
    #[instrument(skip(self))]
    pub async fn return_book(&self, id: BookId, delay: Duration) -> Result<Book, LendingError> {
        let mut book = self.find_by_id(id).await?;
        if !book.can_be_returned() {
            return Err(LendingError::InvalidState {
                id,
                status: book.status(),
            });
        }
        let from = book.status();
        book.to_organizing();
        self.store.create(&book).await?;
        info!(book_id = %id, %from, "book returned, organizing");
        self.schedule_available(book.clone(), delay);
        Ok(book)
    }

    /// [`Self::return_book`] with the configured organizing delay.
    pub async fn return_book_after_default_delay(&self, id: BookId) -> Result<Book, LendingError> {
        self.return_book(id, self.return_delay).await
    }

    fn schedule_available(&self, returned: Book, delay: Duration) {
        let store = Arc::clone(&self.store);
        let task_id = match self.deferred_write {
            DeferredWrite::Guarded => self
                .scheduler
                .schedule(delay, shelve_if_unchanged(store, returned)),
            DeferredWrite::Blind => self.scheduler.schedule(delay, shelve(store, returned)),
        };
        debug!(%task_id, policy = ?self.deferred_write, "availability scheduled");
    }

    // ── MarkLost ─────────────────────────────────────────────────────────────

    #[instrument(skip(self))]
    pub async fn mark_lost(&self, id: BookId) -> Result<Book, LendingError> {
        let mut book = self.find_by_id(id).await?;
        if book.is_lost() {
            return Err(LendingError::AlreadyLost(id));
        }
        let from = book.status();
        book.to_lost();
        self.store.create(&book).await?;
        info!(book_id = %id, %from, "book marked lost");
        Ok(book)
    }

    // ── Delete ───────────────────────────────────────────────────────────────

    #[instrument(skip(self))]
    pub async fn delete(&self, id: BookId) -> Result<(), LendingError> {
        let book = self.find_by_id(id).await?;
        self.store.delete_by_id(id).await?;
        info!(book_id = %id, status = %book.status(), "book deleted");
        Ok(())
    }

    // ── Deferred transitions ─────────────────────────────────────────────────

    /// Returns whose availability has not been written yet.
    pub fn pending_transitions(&self) -> usize {
        self.scheduler.pending()
    }

    /// Drop every pending return-to-available transition.
    pub fn shutdown(&self) {
        self.scheduler.shutdown();
    }
}

/// Write `AVAILABLE` over the record captured on return.
async fn shelve<S: BookStore>(store: Arc<S>, mut book: Book) -> Result<(), LendingError> {
    book.to_available();
    store.create(&book).await?;
    info!(book_id = %book.id(), "book available");
    Ok(())
}

/// Write `AVAILABLE` only if nothing touched the book since it was returned.
async fn shelve_if_unchanged<S: BookStore>(
    store: Arc<S>,
    returned: Book,
) -> Result<(), LendingError> {
    let id = returned.id();
    let Some(mut current) = store.find_by_id(id).await? else {
        warn!(book_id = %id, "book deleted before it was shelved");
        return Ok(());
    };
    if current.status() != BookStatus::Organizing || current.revision() != returned.revision() {
        warn!(
            book_id = %id,
            status = %current.status(),
            revision = current.revision(),
            expected_revision = returned.revision(),
            "book changed since return, not shelved"
        );
        return Ok(());
    }
    current.to_available();
    store.create(&current).await?;
    info!(book_id = %id, "book available");
    Ok(())
}
