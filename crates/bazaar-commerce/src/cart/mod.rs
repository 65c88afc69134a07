//! Shopping cart module.
//!
//! Contains the cart, its line items, and the display values derived from
//! them (subtotals, discount badges, savings, totals).

mod cart;
mod pricing;

pub use cart::{Cart, CartLineItem, MAX_QUANTITY_PER_ITEM};
pub use pricing::{discount_percent, valid_original_price, CartPricing, LineItemPricing};
