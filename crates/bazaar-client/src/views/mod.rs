//! View models.
//!
//! Pure functions from store state to display values. Nothing here is
//! cached; every view is rebuilt from the current snapshot.

mod cart;
mod catalog;
mod customers;
mod reviews;

pub use cart::{CartLineView, CartView};
pub use catalog::{CategoryNav, CategoryNavEntry, CategoryTile, ProductCard};
pub use customers::{CustomerRow, CustomerTable, NO_CUSTOMERS_MESSAGE};
pub use reviews::{ReviewSummary, NO_REVIEWS_MESSAGE};

use crate::store::{ListState, LoadStatus};

/// What a list view should show.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Error(String),
    Empty,
    Ready(T),
}

impl<T> ViewState<T> {
    /// Map a loaded list, checking loading and error first.
    pub fn from_list<S>(list: &ListState<S>, build: impl FnOnce(&[S]) -> T) -> Self {
        match list.status {
            LoadStatus::Loading => ViewState::Loading,
            LoadStatus::Failed => ViewState::Error(list.error.clone().unwrap_or_default()),
            _ if list.items.is_empty() => ViewState::Empty,
            _ => ViewState::Ready(build(&list.items)),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Badge text for a discount.
pub(crate) fn discount_badge(percent: Option<u32>) -> Option<String> {
    percent.filter(|p| *p > 0).map(|p| format!("{}% off", p))
}
