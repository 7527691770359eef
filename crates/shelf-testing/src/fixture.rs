//! Book fixtures.

use chrono::{DateTime, TimeZone, Utc};

use shelf_domain::book::{Book, NewBook};
use shelf_domain::id::BookId;
use shelf_domain::status::BookStatus;

/// Fixed registration time so fixtures compare equal across runs.
pub fn registered_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

pub fn dune() -> NewBook {
    NewBook::new("Dune", "Frank Herbert", 412)
}

/// A handful of registration inputs with overlapping titles for search tests.
pub fn catalog() -> Vec<NewBook> {
    vec![
        dune(),
        NewBook::new("Dune Messiah", "Frank Herbert", 256),
        NewBook::new("Emma", "Jane Austen", 474),
        NewBook::new("Middlemarch", "George Eliot", 880),
    ]
}

/// A stored book already in `status`, as a store would hand it back.
pub fn book_with_status(id: u64, status: BookStatus) -> Book {
    Book::restore(BookId(id), dune(), status, 0, registered_at())
}
