use serde::Deserialize;

use shelf_domain::book::Book;
use shelf_domain::status::BookStatus;

/// Result of a borrow request.
///
/// An ineligible book is not an error: the call leaves it untouched and
/// reports the status that blocked it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BorrowOutcome {
    Borrowed(Book),
    Unavailable(BookStatus),
}

impl BorrowOutcome {
    pub fn is_borrowed(&self) -> bool {
        matches!(self, Self::Borrowed(_))
    }
}

/// How the deferred return-to-available write treats the stored record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeferredWrite {
    /// Overwrite the record captured on return with `AVAILABLE`, whatever
    /// happened to it in the meantime. Re-inserts deleted books.
    #[default]
    Blind,
    /// Reload at fire time; write only if the record still exists, is
    /// `ORGANIZING`, and carries the revision captured on return.
    Guarded,
}
