use shelf_domain::id::BookId;
use shelf_domain::status::BookStatus;

/// Lending service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum LendingError {
    #[error("book not found: {0}")]
    BookNotFound(BookId),
    #[error("book {id} cannot be returned while {status}")]
    InvalidState { id: BookId, status: BookStatus },
    #[error("book {0} is already lost")]
    AlreadyLost(BookId),
    #[error("book store failure")]
    Store(#[from] anyhow::Error),
}

impl LendingError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BookNotFound(_) => "BOOK_NOT_FOUND",
            Self::InvalidState { .. } => "INVALID_STATE",
            Self::AlreadyLost(_) => "ALREADY_LOST",
            Self::Store(_) => "STORE",
        }
    }
}
