//! Product listing types.

use crate::cart::{discount_percent, CartLineItem};
use crate::ids::{CategoryId, ProductId, SubCategoryId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product as listed in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Current price.
    pub price: Money,
    /// Nominal pre-discount price.
    pub original_price: Option<Money>,
    /// Primary image URL.
    pub image_url: Option<String>,
    /// Category the product is listed under.
    pub category_id: Option<CategoryId>,
    /// Subcategory the product is listed under.
    pub sub_category_id: Option<SubCategoryId>,
    /// Long description.
    pub description: Option<String>,
}

impl Product {
    /// Create a product with the required fields.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            original_price: None,
            image_url: None,
            category_id: None,
            sub_category_id: None,
            description: None,
        }
    }

    /// Discount badge for product cards.
    pub fn discount_percent(&self) -> Option<u32> {
        discount_percent(self.price, self.original_price)
    }

    /// Build a cart line for this product.
    pub fn to_line_item(&self, quantity: i64) -> CartLineItem {
        CartLineItem {
            product_id: self.id.clone(),
            product_name: self.name.clone(),
            price: self.price,
            original_price: self.original_price,
            quantity,
            image_url: self.image_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_to_line_item_copies_display_fields() {
        let mut product = Product::new("p-1", "Kurta", Money::new(79900, Currency::INR));
        product.original_price = Some(Money::new(99900, Currency::INR));
        product.image_url = Some("https://cdn.example.com/kurta.jpg".to_string());

        let line = product.to_line_item(2);
        assert_eq!(line.product_id.as_str(), "p-1");
        assert_eq!(line.quantity, 2);
        assert_eq!(line.original_price, product.original_price);
        assert_eq!(line.image_url.as_deref(), Some("https://cdn.example.com/kurta.jpg"));
        assert_eq!(product.discount_percent(), Some(20));
    }
}
