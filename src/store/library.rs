//! Library slice: book catalog and sales.

use serde::Serialize;

use crate::models::{Book, Sale};

use super::mvi::{Intent, Reducer, SliceState};
use super::resource::{Resource, ResourceEvent, ResourceReducer, Tag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogTag {
    Added,
    Updated,
    Deleted,
}

impl Tag for CatalogTag {
    fn label(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleTag {
    Sold,
}

impl Tag for SaleTag {
    fn label(&self) -> &'static str {
        "sold"
    }
}

pub type CatalogState = Resource<Vec<Book>, CatalogTag>;
pub type CatalogEvent = ResourceEvent<Vec<Book>, CatalogTag>;
pub type SalesState = Resource<Vec<Sale>, SaleTag>;
pub type SalesEvent = ResourceEvent<Vec<Sale>, SaleTag>;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LibraryState {
    pub catalog: CatalogState,
    pub sales: SalesState,
}

impl SliceState for LibraryState {}

#[derive(Debug, Clone, PartialEq)]
pub enum LibraryIntent {
    Catalog(CatalogEvent),
    Sales(SalesEvent),
}

impl Intent for LibraryIntent {}

impl LibraryIntent {
    pub fn label(&self) -> String {
        match self {
            Self::Catalog(event) => format!("library/catalog/{}", event.label()),
            Self::Sales(event) => format!("library/sales/{}", event.label()),
        }
    }
}

pub struct LibraryReducer;

impl Reducer for LibraryReducer {
    type State = LibraryState;
    type Intent = LibraryIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            LibraryIntent::Catalog(event) => LibraryState {
                catalog: ResourceReducer::<Vec<Book>, CatalogTag>::reduce(state.catalog, event),
                ..state
            },
            LibraryIntent::Sales(event) => LibraryState {
                sales: ResourceReducer::<Vec<Sale>, SaleTag>::reduce(state.sales, event),
                ..state
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::resource::Status;

    #[test]
    fn sales_events_leave_catalog_untouched() {
        let state = LibraryReducer::reduce(
            LibraryState::default(),
            LibraryIntent::Catalog(CatalogEvent::Done(CatalogTag::Added)),
        );
        let state = LibraryReducer::reduce(
            state,
            LibraryIntent::Sales(SalesEvent::Done(SaleTag::Sold)),
        );
        assert_eq!(state.catalog.status, Status::Done(CatalogTag::Added));
        assert_eq!(state.sales.status.label(), "sold");
    }

    #[test]
    fn labels_name_the_sub_slice() {
        let intent = LibraryIntent::Sales(SalesEvent::Request);
        assert_eq!(intent.label(), "library/sales/request");
    }
}
