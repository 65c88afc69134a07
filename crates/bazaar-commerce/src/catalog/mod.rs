//! Product catalog module.
//!
//! Read-only reference data: categories with their subcategories, and the
//! products listed under them.

mod category;
mod product;

pub use category::{Category, SubCategory};
pub use product::Product;
