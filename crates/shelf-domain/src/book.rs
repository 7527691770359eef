//! Book domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::BookId;
use crate::status::BookStatus;

/// Registration input for a new catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub page_count: u32,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>, page_count: u32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            page_count,
        }
    }
}

/// A physical book and its lending status.
///
/// `id` and `status` are only reachable through accessors: the id never
/// changes after registration and the status only moves through the
/// `to_*` transitions, each of which bumps `revision`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    id: BookId,
    pub title: String,
    pub author: String,
    pub page_count: u32,
    status: BookStatus,
    revision: u64,
    registered_at: DateTime<Utc>,
}

impl Book {
    /// A freshly registered book, always `AVAILABLE` at revision 0.
    pub fn register(id: BookId, input: NewBook, registered_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            author: input.author,
            page_count: input.page_count,
            status: BookStatus::Available,
            revision: 0,
            registered_at,
        }
    }

    /// Rebuild a book from stored parts. Only adapters should need this.
    pub fn restore(
        id: BookId,
        input: NewBook,
        status: BookStatus,
        revision: u64,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: input.title,
            author: input.author,
            page_count: input.page_count,
            status,
            revision,
            registered_at,
        }
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn status(&self) -> BookStatus {
        self.status
    }

    /// Generation token; changes on every status transition.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    pub fn is_available_to_borrow(&self) -> bool {
        self.status == BookStatus::Available
    }

    /// Only borrowed or lost books can be handed back.
    pub fn can_be_returned(&self) -> bool {
        matches!(self.status, BookStatus::Borrowed | BookStatus::Lost)
    }

    pub fn is_lost(&self) -> bool {
        self.status == BookStatus::Lost
    }

    pub fn to_borrowed(&mut self) {
        self.transition(BookStatus::Borrowed);
    }

    pub fn to_organizing(&mut self) {
        self.transition(BookStatus::Organizing);
    }

    pub fn to_lost(&mut self) {
        self.transition(BookStatus::Lost);
    }

    pub fn to_available(&mut self) {
        self.transition(BookStatus::Available);
    }

    fn transition(&mut self, next: BookStatus) {
        self.status = next;
        self.revision = self.revision.wrapping_add(1);
    }
}
