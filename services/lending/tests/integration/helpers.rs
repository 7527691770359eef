use std::sync::atomic::{AtomicBool, Ordering};

use shelf_domain::book::Book;
use shelf_domain::id::BookId;
use shelf_domain::status::BookStatus;
use shelf_lending::domain::repository::BookStore;
use shelf_lending::domain::types::DeferredWrite;
use shelf_lending::error::LendingError;
use shelf_lending::infra::memory::InMemoryBookStore;
use shelf_lending::usecase::lending::LendingService;

// ── FlakyBookStore ───────────────────────────────────────────────────────────

/// In-memory store whose writes can be switched to fail.
#[derive(Default)]
pub struct FlakyBookStore {
    pub inner: InMemoryBookStore,
    fail_writes: AtomicBool,
}

impl FlakyBookStore {
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), LendingError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("store is read-only").into());
        }
        Ok(())
    }
}

impl BookStore for FlakyBookStore {
    async fn generate_id(&self) -> Result<BookId, LendingError> {
        self.inner.generate_id().await
    }

    async fn create(&self, book: &Book) -> Result<(), LendingError> {
        self.check_writable()?;
        self.inner.create(book).await
    }

    async fn list_all(&self) -> Result<Vec<Book>, LendingError> {
        self.inner.list_all().await
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Book>, LendingError> {
        self.inner.find_by_title(title).await
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, LendingError> {
        self.inner.find_by_id(id).await
    }

    async fn delete_by_id(&self, id: BookId) -> Result<bool, LendingError> {
        self.check_writable()?;
        self.inner.delete_by_id(id).await
    }
}

// ── Service builders ─────────────────────────────────────────────────────────

pub fn service() -> LendingService<InMemoryBookStore> {
    shelf_testing::tracing::init_test_tracing();
    LendingService::new(InMemoryBookStore::new())
}

pub fn service_with(policy: DeferredWrite) -> LendingService<InMemoryBookStore> {
    shelf_testing::tracing::init_test_tracing();
    LendingService::with_policy(InMemoryBookStore::new(), policy)
}

pub fn flaky_service() -> LendingService<FlakyBookStore> {
    shelf_testing::tracing::init_test_tracing();
    LendingService::new(FlakyBookStore::default())
}

/// Current stored status, `None` once deleted.
pub async fn status_of<S: BookStore>(
    service: &LendingService<S>,
    id: BookId,
) -> Option<BookStatus> {
    service.find_by_id(id).await.ok().map(|b| b.status())
}
