//! Library action creators against a mock API.

mod common;

use common::mock_backend::{MockBackend, MockReply};
use schoolhub::handlers::library::{self, SALE_CONFIRMATION};
use schoolhub::http::NETWORK_ERROR;
use schoolhub::models::{Book, BookDraft, SaleRequest};
use schoolhub::store::library::{CatalogTag, LibraryState, SaleTag};
use schoolhub::store::resource::Status;
use schoolhub::store::Store;
use serde_json::json;

fn draft() -> BookDraft {
    BookDraft {
        school_id: Some("s1".to_string()),
        title: Some("Dune".to_string()),
        author: Some("Herbert".to_string()),
        price: Some(9.5),
        quantity: Some(4),
    }
}

fn sale() -> SaleRequest {
    SaleRequest {
        book_id: "b1".to_string(),
        school_id: "s1".to_string(),
        student_id: Some("st1".to_string()),
        quantity: 1,
    }
}

#[tokio::test]
async fn add_book_settles_as_added() {
    let mock = MockBackend::start().await;
    mock.reply(MockReply::json(r#"{"_id":"b1","title":"Dune"}"#));
    let store = Store::default();
    let api = common::client_for(&mock.base_url());
    let log = common::record_actions(&store);

    let outcome = library::add_book(&store, &api, &draft()).await;

    assert!(outcome.success);
    assert_eq!(
        *log.lock(),
        vec!["library/catalog/request", "library/catalog/done"]
    );
    let catalog = store.state().library.catalog;
    assert_eq!(catalog.status, Status::Done(CatalogTag::Added));
    assert_eq!(catalog.status.label(), "added");
    assert!(!catalog.loading);

    let req = mock.last_call();
    assert_eq!((req.method.as_str(), req.path.as_str()), ("POST", "/library/book"));
    assert_eq!(req.json()["schoolId"], "s1");
    assert_eq!(req.json()["quantity"], 4);
}

#[tokio::test]
async fn sell_confirmed_by_message_is_sold() {
    let mock = MockBackend::start().await;
    mock.reply(MockReply::json(
        &json!({ "message": SALE_CONFIRMATION }).to_string(),
    ));
    let store = Store::default();
    let api = common::client_for(&mock.base_url());

    let outcome = library::sell_book(&store, &api, &sale()).await;

    assert!(outcome.success);
    assert_eq!(outcome.message.as_deref(), Some(SALE_CONFIRMATION));
    let sales = store.state().library.sales;
    assert_eq!(sales.status, Status::Done(SaleTag::Sold));
    assert_eq!(sales.status.label(), "sold");
    assert!(sales.response.is_none());
    assert_eq!(mock.last_call().json()["bookId"], "b1");
}

#[tokio::test]
async fn sell_with_other_message_is_application_failure() {
    let mock = MockBackend::start().await;
    mock.reply(MockReply::json(r#"{"message":"Insufficient stock"}"#));
    let store = Store::default();
    let api = common::client_for(&mock.base_url());

    let outcome = library::sell_book(&store, &api, &sale()).await;

    assert!(!outcome.success);
    let sales = store.state().library.sales;
    assert_eq!(sales.status, Status::Failed);
    assert!(sales.error.is_none());
    assert_eq!(sales.response.as_deref(), Some("Insufficient stock"));
    assert!(!sales.loading);
}

#[tokio::test]
async fn fetch_books_stores_payload_exactly() {
    let books = json!([
        {"_id": "b1", "title": "Dune", "price": 9.5},
        {"_id": "b2", "title": "Emma", "author": "Austen"}
    ]);
    let mock = MockBackend::start().await;
    mock.reply(MockReply::json(&books.to_string()));
    let store = Store::default();
    let api = common::client_for(&mock.base_url());

    let outcome = library::fetch_books(&store, &api, "s1").await;

    assert!(outcome.success);
    let expected: Vec<Book> = serde_json::from_value(books.clone()).unwrap();
    let catalog = store.state().library.catalog;
    assert_eq!(catalog.data, expected);
    assert_eq!(catalog.status, Status::Success);
    assert_eq!(serde_json::to_value(&catalog.data).unwrap(), books);
    assert_eq!(mock.last_call().path, "/library/books/s1");
}

#[tokio::test]
async fn fetch_with_message_keeps_previous_data() {
    let mock = MockBackend::start().await;
    mock.reply(MockReply::json(r#"[{"_id":"b1","title":"Dune"}]"#));
    mock.reply(MockReply::json(r#"{"message":"No books found"}"#));
    let store = Store::default();
    let api = common::client_for(&mock.base_url());

    library::fetch_books(&store, &api, "s1").await;
    let before = store.state().library.catalog.data;
    library::fetch_books(&store, &api, "s1").await;

    let catalog = store.state().library.catalog;
    assert_eq!(catalog.data, before);
    assert_eq!(catalog.response.as_deref(), Some("No books found"));
    assert!(catalog.error.is_none());
    assert_eq!(catalog.status, Status::Failed);
}

#[tokio::test]
async fn bodyless_server_error_falls_back_to_network_error() {
    let mock = MockBackend::start().await;
    mock.reply(MockReply::empty(500));
    let store = Store::default();
    let api = common::client_for(&mock.base_url());

    let outcome = library::fetch_sales(&store, &api, "s1").await;

    assert!(!outcome.success);
    let sales = store.state().library.sales;
    assert_eq!(sales.error.as_deref(), Some(NETWORK_ERROR));
    assert!(sales.response.is_none());
    assert_eq!(sales.status, Status::Error);
}

#[tokio::test]
async fn unreachable_server_settles_as_error() {
    let store = Store::default();
    let api = common::client_for(&common::closed_address());
    let log = common::record_actions(&store);

    library::delete_book(&store, &api, "b1").await;

    assert_eq!(
        *log.lock(),
        vec!["library/catalog/request", "library/catalog/error"]
    );
    let catalog = store.state().library.catalog;
    assert_eq!(catalog.error.as_deref(), Some(NETWORK_ERROR));
    assert!(!catalog.loading);
}

#[tokio::test]
async fn every_operation_dispatches_one_terminal_event() {
    let mock = MockBackend::start().await;
    for body in [
        r#"[]"#,
        r#"{"_id":"b9"}"#,
        r#"{"_id":"b9"}"#,
        r#"{"message":"Book not found"}"#,
        r#"{"message":"Book sold successfully"}"#,
        r#"[]"#,
    ] {
        mock.reply(MockReply::json(body));
    }
    let store = Store::default();
    let api = common::client_for(&mock.base_url());
    let log = common::record_actions(&store);

    library::fetch_books(&store, &api, "s1").await;
    library::add_book(&store, &api, &draft()).await;
    library::update_book(&store, &api, "b9", &draft()).await;
    library::delete_book(&store, &api, "b9").await;
    library::sell_book(&store, &api, &sale()).await;
    library::fetch_sales(&store, &api, "s1").await;

    let log = log.lock().clone();
    assert_eq!(log.len(), 12);
    for pair in log.chunks(2) {
        assert!(pair[0].ends_with("/request"), "{:?}", pair);
        assert!(!pair[1].ends_with("/request"), "{:?}", pair);
    }
    assert_eq!(log[3], "library/catalog/done");
    assert_eq!(log[7], "library/catalog/failed");

    let state = store.state().library;
    assert!(!state.catalog.loading);
    assert!(!state.sales.loading);
}

#[tokio::test]
async fn reset_returns_slices_to_idle() {
    let mock = MockBackend::start().await;
    mock.reply(MockReply::json(r#"[{"_id":"b1"}]"#));
    mock.reply(MockReply::json(r#"{"message":"Insufficient stock"}"#));
    let store = Store::default();
    let api = common::client_for(&mock.base_url());

    library::fetch_books(&store, &api, "s1").await;
    library::sell_book(&store, &api, &sale()).await;
    library::reset(&store);

    let state = store.state().library;
    assert_eq!(state.catalog.status, Status::Idle);
    assert_eq!(state.catalog.data.len(), 1);
    assert_eq!(state.sales.status, Status::Idle);
    assert!(state.sales.response.is_none());
    assert_ne!(state, LibraryState::default());
}
