//! Application state shape.

use bazaar_auth::AuthSession;
use bazaar_commerce::catalog::{Category, Product};
use bazaar_commerce::customer::Customer;
use bazaar_commerce::{Cart, CategoryId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Progress of a remote load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Failed,
    Succeeded,
}

/// Everything the client knows, owned by the [`Store`](super::Store).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub auth: AuthSession,
    pub cart: CartState,
    pub catalog: CatalogState,
    pub customers: ListState<Customer>,
}

/// The authoritative cart plus the status of remote cart calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    /// Guest cart while logged out, server cart while logged in.
    pub cart: Cart,
    pub status: LoadStatus,
    /// Message from the last failed remote cart call.
    pub error: Option<String>,
    /// Remote cart calls still outstanding.
    pub pending: u32,
    /// Whether `cart` came from the server during this session.
    pub synced: bool,
    /// Bumped on logout. Calls started in an earlier generation no longer
    /// count towards `pending`.
    pub generation: u64,
}

impl CartState {
    /// Whether a remote cart call is outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }
}

/// A remotely loaded list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub status: LoadStatus,
    pub error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: LoadStatus::Idle,
            error: None,
        }
    }
}

impl<T> ListState<T> {
    pub(crate) fn start(&mut self) {
        self.status = LoadStatus::Loading;
        self.error = None;
    }

    pub(crate) fn succeed(&mut self, items: Vec<T>) {
        self.items = items;
        self.status = LoadStatus::Succeeded;
        self.error = None;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.status = LoadStatus::Failed;
        self.error = Some(message);
    }
}

/// Catalog data backing the category navigation and product grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogState {
    pub categories: ListState<Category>,
    pub products: ListState<Product>,
    /// First product image per category, for category tiles.
    pub cover_images: BTreeMap<CategoryId, String>,
}
