use std::time::Duration;

use shelf_domain::book::NewBook;
use shelf_domain::id::BookId;
use shelf_domain::status::BookStatus;
use shelf_lending::domain::types::BorrowOutcome;
use shelf_lending::error::LendingError;
use shelf_testing::fixture;

use crate::helpers::{service, status_of};

// ── Lifecycle scenarios ──────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn should_walk_dune_through_borrow_and_return() {
    let service = service();

    let book = service
        .register(NewBook::new("Dune", "Herbert", 412))
        .await
        .unwrap();
    let id = book.id();
    assert_eq!(book.status(), BookStatus::Available);

    let outcome = service.borrow(id).await.unwrap();
    assert!(outcome.is_borrowed());
    assert_eq!(status_of(&service, id).await, Some(BookStatus::Borrowed));

    let returned = service.return_book(id, Duration::from_secs(5)).await.unwrap();
    assert_eq!(returned.status(), BookStatus::Organizing);
    assert_eq!(status_of(&service, id).await, Some(BookStatus::Organizing));

    tokio::time::sleep(Duration::from_secs(4)).await;
    assert_eq!(status_of(&service, id).await, Some(BookStatus::Organizing));

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(status_of(&service, id).await, Some(BookStatus::Available));
}

#[tokio::test]
async fn should_reject_return_right_after_registration() {
    let service = service();
    let id = service.register(fixture::dune()).await.unwrap().id();

    let result = service.return_book(id, Duration::from_secs(1)).await;

    assert!(
        matches!(
            result,
            Err(LendingError::InvalidState {
                status: BookStatus::Available,
                ..
            })
        ),
        "expected InvalidState, got {result:?}"
    );
    assert_eq!(status_of(&service, id).await, Some(BookStatus::Available));
    assert_eq!(service.pending_transitions(), 0);
}

#[tokio::test]
async fn should_reject_second_mark_lost() {
    let service = service();
    let id = service.register(fixture::dune()).await.unwrap().id();

    service.mark_lost(id).await.unwrap();
    let result = service.mark_lost(id).await;

    assert!(
        matches!(result, Err(LendingError::AlreadyLost(lost)) if lost == id),
        "expected AlreadyLost, got {result:?}"
    );
    assert_eq!(status_of(&service, id).await, Some(BookStatus::Lost));
}

#[tokio::test(start_paused = true)]
async fn should_shelve_a_lost_book_once_it_turns_up() {
    let service = service();
    let id = service.register(fixture::dune()).await.unwrap().id();
    service.mark_lost(id).await.unwrap();

    service.return_book(id, Duration::from_millis(300)).await.unwrap();
    assert_eq!(status_of(&service, id).await, Some(BookStatus::Organizing));

    tokio::time::sleep(Duration::from_millis(301)).await;
    assert_eq!(status_of(&service, id).await, Some(BookStatus::Available));
}

#[tokio::test(start_paused = true)]
async fn should_reject_return_while_organizing() {
    let service = service();
    let id = service.register(fixture::dune()).await.unwrap().id();
    service.borrow(id).await.unwrap();
    service.return_book(id, Duration::from_secs(10)).await.unwrap();

    let result = service.return_book(id, Duration::from_secs(10)).await;

    assert!(matches!(
        result,
        Err(LendingError::InvalidState {
            status: BookStatus::Organizing,
            ..
        })
    ));
    assert_eq!(service.pending_transitions(), 1);
}

#[tokio::test(start_paused = true)]
async fn should_accept_return_with_unbounded_delay() {
    let service = service();
    let id = service.register(fixture::dune()).await.unwrap().id();
    service.borrow(id).await.unwrap();

    let returned = service.return_book(id, Duration::MAX).await.unwrap();

    assert_eq!(returned.status(), BookStatus::Organizing);
    assert_eq!(status_of(&service, id).await, Some(BookStatus::Organizing));
    assert_eq!(service.pending_transitions(), 1);

    // The book can still leave ORGANIZING through the other operations.
    service.mark_lost(id).await.unwrap();
    service.return_book(id, Duration::from_secs(1)).await.unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(status_of(&service, id).await, Some(BookStatus::Available));
}

#[tokio::test]
async fn should_leave_borrowed_book_untouched_on_second_borrow() {
    let service = service();
    let id = service.register(fixture::dune()).await.unwrap().id();
    service.borrow(id).await.unwrap();

    let outcome = service.borrow(id).await.unwrap();

    assert_eq!(outcome, BorrowOutcome::Unavailable(BookStatus::Borrowed));
    assert_eq!(status_of(&service, id).await, Some(BookStatus::Borrowed));
}

#[tokio::test]
async fn should_not_borrow_a_lost_book() {
    let service = service();
    let id = service.register(fixture::dune()).await.unwrap().id();
    service.mark_lost(id).await.unwrap();

    let outcome = service.borrow(id).await.unwrap();

    assert_eq!(outcome, BorrowOutcome::Unavailable(BookStatus::Lost));
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_every_book_as_available_with_unique_ids() {
    let service = service();
    for input in fixture::catalog() {
        service.register(input).await.unwrap();
    }

    let books = service.list_all().await.unwrap();

    assert_eq!(books.len(), 4);
    assert!(books.iter().all(|b| b.status() == BookStatus::Available));
    let mut ids: Vec<_> = books.iter().map(|b| b.id()).collect();
    ids.dedup();
    assert_eq!(ids.len(), 4);
}

#[tokio::test]
async fn should_find_books_by_partial_title() {
    let service = service();
    for input in fixture::catalog() {
        service.register(input).await.unwrap();
    }

    let dunes = service.find_by_title("Dune").await.unwrap();
    assert_eq!(dunes.len(), 2);
    assert!(dunes.iter().all(|b| b.author == "Frank Herbert"));

    assert!(service.find_by_title("Ulysses").await.unwrap().is_empty());
}

// ── Delete ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_book_in_any_status() {
    let service = service();
    let available = service.register(fixture::dune()).await.unwrap().id();
    let borrowed = service.register(fixture::dune()).await.unwrap().id();
    let lost = service.register(fixture::dune()).await.unwrap().id();
    service.borrow(borrowed).await.unwrap();
    service.mark_lost(lost).await.unwrap();

    for id in [available, borrowed, lost] {
        service.delete(id).await.unwrap();
        assert!(matches!(
            service.find_by_id(id).await,
            Err(LendingError::BookNotFound(_))
        ));
    }
    assert!(service.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn should_return_not_found_for_every_operation_on_unknown_id() {
    let service = service();
    let id = BookId(404);

    assert!(matches!(service.borrow(id).await, Err(LendingError::BookNotFound(_))));
    assert!(matches!(
        service.return_book(id, Duration::from_secs(1)).await,
        Err(LendingError::BookNotFound(_))
    ));
    assert!(matches!(service.mark_lost(id).await, Err(LendingError::BookNotFound(_))));
    assert!(matches!(service.delete(id).await, Err(LendingError::BookNotFound(_))));
    assert!(matches!(service.find_by_id(id).await, Err(LendingError::BookNotFound(_))));
}

#[tokio::test]
async fn should_not_reuse_ids_after_delete() {
    let service = service();
    let first = service.register(fixture::dune()).await.unwrap().id();
    service.delete(first).await.unwrap();

    let second = service.register(fixture::dune()).await.unwrap().id();

    assert_ne!(first, second);
}
