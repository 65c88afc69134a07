//! Storefront domain types and logic for Bazaar.
//!
//! This crate holds everything the storefront client knows without talking
//! to the network:
//!
//! - **Cart**: line items keyed by product, quantity rules, derived pricing
//! - **Catalog**: categories, subcategories, products
//! - **Customer**: the admin customer directory and its search filter
//! - **Review**: reviews and the client-side submission guard
//!
//! # Example
//!
//! ```rust,ignore
//! use bazaar_commerce::prelude::*;
//!
//! let mut cart = Cart::new();
//! cart.add_item(CartLineItem::new(
//!     ProductId::new("p-1"),
//!     "Cotton Kurta",
//!     Money::from_decimal(799.0, Currency::INR),
//!     2,
//! ))?;
//!
//! let pricing = cart.pricing()?;
//! println!("Total: {}", pricing.total_amount.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod customer;
pub mod review;

pub use cart::{Cart, CartLineItem};
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{Cart, CartLineItem, CartPricing, LineItemPricing};

    // Catalog
    pub use crate::catalog::{Category, Product, SubCategory};

    // Customer
    pub use crate::customer::{filter_customers, Customer};

    // Review
    pub use crate::review::{Review, ReviewDraft, ReviewValidationError};
}
