//! Library inventory and sales.

use crate::http::{ApiClient, ApiResponse};
use crate::models::{Book, BookDraft, Sale, SaleRequest};
use crate::store::library::{CatalogEvent, CatalogTag, LibraryIntent, SaleTag, SalesEvent};
use crate::store::{Action, Store};

use super::{completion, payload, run, ActionOutcome, Settled};

/// The message the server uses to confirm a sale. Any other message on a
/// sale response is a rejection.
pub const SALE_CONFIRMATION: &str = "Book sold successfully";

fn catalog(event: CatalogEvent) -> Action {
    Action::Library(LibraryIntent::Catalog(event))
}

fn sales(event: SalesEvent) -> Action {
    Action::Library(LibraryIntent::Sales(event))
}

/// `GET /library/books/{schoolId}`
pub async fn fetch_books(store: &Store, api: &ApiClient, school_id: &str) -> ActionOutcome {
    let path = format!("/library/books/{}", school_id);
    run(store, catalog, api.get(&path), payload::<Vec<Book>, CatalogTag>).await
}

/// `POST /library/book`
pub async fn add_book(store: &Store, api: &ApiClient, draft: &BookDraft) -> ActionOutcome {
    run(
        store,
        catalog,
        api.post("/library/book", draft),
        completion(CatalogTag::Added),
    )
    .await
}

/// `PUT /library/book/{bookId}`
pub async fn update_book(
    store: &Store,
    api: &ApiClient,
    book_id: &str,
    draft: &BookDraft,
) -> ActionOutcome {
    let path = format!("/library/book/{}", book_id);
    run(
        store,
        catalog,
        api.put(&path, draft),
        completion(CatalogTag::Updated),
    )
    .await
}

/// `DELETE /library/book/{bookId}`
pub async fn delete_book(store: &Store, api: &ApiClient, book_id: &str) -> ActionOutcome {
    let path = format!("/library/book/{}", book_id);
    run(
        store,
        catalog,
        api.delete(&path),
        completion(CatalogTag::Deleted),
    )
    .await
}

/// `POST /library/sell`
pub async fn sell_book(store: &Store, api: &ApiClient, sale: &SaleRequest) -> ActionOutcome {
    run(store, sales, api.post("/library/sell", sale), classify_sale).await
}

/// `GET /library/sales/{schoolId}`
pub async fn fetch_sales(store: &Store, api: &ApiClient, school_id: &str) -> ActionOutcome {
    let path = format!("/library/sales/{}", school_id);
    run(store, sales, api.get(&path), payload::<Vec<Sale>, SaleTag>).await
}

fn classify_sale(response: ApiResponse) -> Result<Settled<Vec<Sale>, SaleTag>, String> {
    match response.message() {
        None | Some(SALE_CONFIRMATION) => Ok(Settled::Done(SaleTag::Sold)),
        Some(other) => Ok(Settled::Failed(other.to_string())),
    }
}

/// Dispatch the "under control" reset for both library sub-slices.
pub fn reset(store: &Store) {
    store.dispatch(catalog(CatalogEvent::Reset));
    store.dispatch(sales(SalesEvent::Reset));
}
