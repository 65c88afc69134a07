//! Actions and the pure reducer that applies them.

use super::state::{AppState, CartState, LoadStatus};
use bazaar_auth::Role;
use bazaar_commerce::catalog::{Category, Product};
use bazaar_commerce::customer::Customer;
use bazaar_commerce::{Cart, CartLineItem, CategoryId, CommerceError, ProductId};
use std::collections::BTreeMap;

/// Every state change goes through one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Auth
    LoginStarted,
    LoginSucceeded { role: Role },
    LoginFailed(String),
    LoggedOut,

    // Local cart mutations
    CartItemAdded(CartLineItem),
    CartQuantitySet { product_id: ProductId, quantity: i64 },
    CartItemRemoved(ProductId),
    CartCleared,
    /// Replace the cart wholesale, e.g. a persisted guest cart.
    CartRestored(Cart),

    // Remote cart calls
    CartRequestStarted,
    CartLoaded(Cart),
    CartRequestFailed(String),
    /// A response was discarded: a newer request superseded it, or the
    /// session it belonged to has ended. Carries the cart generation the
    /// request was started in.
    CartRequestDropped { generation: u64 },

    // Catalog
    CategoriesLoading,
    CategoriesLoaded(Vec<Category>),
    CategoriesFailed(String),
    ProductsLoading,
    ProductsLoaded(Vec<Product>),
    ProductsFailed(String),
    CoverImagesLoaded(BTreeMap<CategoryId, String>),

    // Admin
    CustomersLoading,
    CustomersLoaded(Vec<Customer>),
    CustomersFailed(String),
}

impl Action {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::LoginStarted => "login_started",
            Action::LoginSucceeded { .. } => "login_succeeded",
            Action::LoginFailed(_) => "login_failed",
            Action::LoggedOut => "logged_out",
            Action::CartItemAdded(_) => "cart_item_added",
            Action::CartQuantitySet { .. } => "cart_quantity_set",
            Action::CartItemRemoved(_) => "cart_item_removed",
            Action::CartCleared => "cart_cleared",
            Action::CartRestored(_) => "cart_restored",
            Action::CartRequestStarted => "cart_request_started",
            Action::CartLoaded(_) => "cart_loaded",
            Action::CartRequestFailed(_) => "cart_request_failed",
            Action::CartRequestDropped { .. } => "cart_request_dropped",
            Action::CategoriesLoading => "categories_loading",
            Action::CategoriesLoaded(_) => "categories_loaded",
            Action::CategoriesFailed(_) => "categories_failed",
            Action::ProductsLoading => "products_loading",
            Action::ProductsLoaded(_) => "products_loaded",
            Action::ProductsFailed(_) => "products_failed",
            Action::CoverImagesLoaded(_) => "cover_images_loaded",
            Action::CustomersLoading => "customers_loading",
            Action::CustomersLoaded(_) => "customers_loaded",
            Action::CustomersFailed(_) => "customers_failed",
        }
    }
}

/// Apply an action.
///
/// On error the state is left untouched.
pub fn reduce(state: &mut AppState, action: Action) -> Result<(), CommerceError> {
    match action {
        Action::LoginStarted => state.auth.begin_login(),
        Action::LoginSucceeded { role } => state.auth.login_succeeded(role),
        Action::LoginFailed(message) => state.auth.login_failed(message),
        Action::LoggedOut => {
            state.auth.logout();
            state.cart = CartState {
                generation: state.cart.generation + 1,
                ..CartState::default()
            };
            state.customers = Default::default();
        }

        Action::CartItemAdded(item) => state.cart.cart.add_item(item)?,
        Action::CartQuantitySet {
            product_id,
            quantity,
        } => {
            state.cart.cart.set_quantity(&product_id, quantity)?;
        }
        Action::CartItemRemoved(product_id) => {
            state.cart.cart.remove(&product_id);
        }
        Action::CartCleared => state.cart.cart.clear(),
        Action::CartRestored(cart) => state.cart.cart = cart,

        Action::CartRequestStarted => {
            state.cart.pending += 1;
            state.cart.status = LoadStatus::Loading;
            state.cart.error = None;
        }
        Action::CartLoaded(cart) => {
            state.cart.cart = cart;
            state.cart.synced = true;
            finish_cart_request(state, LoadStatus::Succeeded);
        }
        Action::CartRequestFailed(message) => {
            state.cart.error = Some(message);
            finish_cart_request(state, LoadStatus::Failed);
        }
        Action::CartRequestDropped { generation } => {
            if generation != state.cart.generation {
                return Ok(());
            }
            let status = if state.cart.error.is_some() {
                LoadStatus::Failed
            } else {
                LoadStatus::Succeeded
            };
            finish_cart_request(state, status);
        }

        Action::CategoriesLoading => state.catalog.categories.start(),
        Action::CategoriesLoaded(categories) => state.catalog.categories.succeed(categories),
        Action::CategoriesFailed(message) => state.catalog.categories.fail(message),
        Action::ProductsLoading => state.catalog.products.start(),
        Action::ProductsLoaded(products) => state.catalog.products.succeed(products),
        Action::ProductsFailed(message) => state.catalog.products.fail(message),
        Action::CoverImagesLoaded(images) => state.catalog.cover_images.extend(images),

        Action::CustomersLoading => state.customers.start(),
        Action::CustomersLoaded(customers) => state.customers.succeed(customers),
        Action::CustomersFailed(message) => state.customers.fail(message),
    }
    Ok(())
}

fn finish_cart_request(state: &mut AppState, status: LoadStatus) {
    state.cart.pending = state.cart.pending.saturating_sub(1);
    state.cart.status = if state.cart.pending > 0 && status != LoadStatus::Failed {
        LoadStatus::Loading
    } else {
        status
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_commerce::{Currency, Money};

    fn line(id: &str, quantity: i64) -> CartLineItem {
        CartLineItem::new(
            ProductId::new(id),
            format!("Product {}", id),
            Money::new(50000, Currency::INR),
            quantity,
        )
    }

    #[test]
    fn test_quantity_below_one_removes() {
        let mut state = AppState::default();
        reduce(&mut state, Action::CartItemAdded(line("a", 2))).unwrap();

        reduce(
            &mut state,
            Action::CartQuantitySet {
                product_id: ProductId::new("a"),
                quantity: 0,
            },
        )
        .unwrap();
        assert!(state.cart.cart.is_empty());

        reduce(&mut state, Action::CartItemAdded(line("b", 1))).unwrap();
        reduce(
            &mut state,
            Action::CartQuantitySet {
                product_id: ProductId::new("b"),
                quantity: -3,
            },
        )
        .unwrap();
        assert!(state.cart.cart.is_empty());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut state = AppState::default();
        reduce(&mut state, Action::CartItemAdded(line("a", 1))).unwrap();
        let before = state.clone();
        reduce(&mut state, Action::CartItemRemoved(ProductId::new("zzz"))).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_clear_any_size() {
        let mut state = AppState::default();
        reduce(&mut state, Action::CartCleared).unwrap();
        assert!(state.cart.cart.is_empty());

        reduce(&mut state, Action::CartItemAdded(line("a", 3))).unwrap();
        reduce(&mut state, Action::CartItemAdded(line("b", 1))).unwrap();
        reduce(&mut state, Action::CartCleared).unwrap();
        assert!(state.cart.cart.is_empty());
    }

    #[test]
    fn test_failed_add_leaves_state() {
        let mut state = AppState::default();
        let before = state.clone();
        assert!(reduce(&mut state, Action::CartItemAdded(line("a", 0))).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_cart_request_status() {
        let mut state = AppState::default();
        reduce(&mut state, Action::CartRequestStarted).unwrap();
        reduce(&mut state, Action::CartRequestStarted).unwrap();
        assert!(state.cart.is_loading());

        reduce(&mut state, Action::CartRequestDropped { generation: 0 }).unwrap();
        assert_eq!(state.cart.status, LoadStatus::Loading);

        reduce(&mut state, Action::CartLoaded(Cart::from_items(vec![line("a", 1)]))).unwrap();
        assert_eq!(state.cart.status, LoadStatus::Succeeded);
        assert!(!state.cart.is_loading());
        assert_eq!(state.cart.cart.len(), 1);
    }

    #[test]
    fn test_failed_request_keeps_cart() {
        let mut state = AppState::default();
        reduce(&mut state, Action::CartItemAdded(line("a", 1))).unwrap();
        reduce(&mut state, Action::CartRequestStarted).unwrap();
        reduce(&mut state, Action::CartRequestFailed("boom".to_string())).unwrap();

        assert_eq!(state.cart.status, LoadStatus::Failed);
        assert_eq!(state.cart.error.as_deref(), Some("boom"));
        assert_eq!(state.cart.cart.len(), 1);
    }

    #[test]
    fn test_logout_resets_cart_keeps_epoch() {
        let mut state = AppState::default();
        reduce(&mut state, Action::LoginSucceeded { role: Role::Admin }).unwrap();
        reduce(&mut state, Action::CartItemAdded(line("a", 1))).unwrap();
        reduce(&mut state, Action::LoggedOut).unwrap();

        assert!(!state.auth.is_logged_in);
        assert_eq!(state.auth.login_epoch, 1);
        assert!(state.cart.cart.is_empty());
    }

    #[test]
    fn test_drop_from_before_logout_leaves_new_cart_alone() {
        let mut state = AppState::default();
        reduce(&mut state, Action::LoginSucceeded { role: Role::Customer }).unwrap();
        reduce(&mut state, Action::CartRequestStarted).unwrap();
        reduce(&mut state, Action::CartLoaded(Cart::from_items(vec![line("a", 1)]))).unwrap();
        assert!(state.cart.synced);
        reduce(&mut state, Action::CartRequestStarted).unwrap();
        let old_generation = state.cart.generation;

        reduce(&mut state, Action::LoggedOut).unwrap();
        assert!(!state.cart.synced);
        assert_eq!(state.cart.generation, old_generation + 1);

        reduce(&mut state, Action::LoginSucceeded { role: Role::Customer }).unwrap();
        reduce(&mut state, Action::CartRequestStarted).unwrap();
        reduce(
            &mut state,
            Action::CartRequestDropped {
                generation: old_generation,
            },
        )
        .unwrap();
        assert!(state.cart.is_loading());
        assert_eq!(state.cart.status, LoadStatus::Loading);
    }
}
