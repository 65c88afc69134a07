//! JSON shapes exchanged with the backend.
//!
//! Prices travel as decimal numbers and ids as strings or integers; both
//! are normalized here so the rest of the client only sees domain types.

use bazaar_commerce::catalog::{Category, Product, SubCategory};
use bazaar_commerce::customer::Customer;
use bazaar_commerce::ids::string_or_number;
use bazaar_commerce::review::Review;
use bazaar_commerce::{
    CartLineItem, CategoryId, Currency, CustomerId, Money, ProductId, ReviewId, SubCategoryId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireSubCategory {
    #[serde(alias = "_id", deserialize_with = "string_or_number::deserialize")]
    pub id: SubCategoryId,
    pub name: String,
}

impl From<WireSubCategory> for SubCategory {
    fn from(wire: WireSubCategory) -> Self {
        SubCategory::new(wire.id, wire.name)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireCategory {
    #[serde(alias = "_id", deserialize_with = "string_or_number::deserialize")]
    pub id: CategoryId,
    pub name: String,
    #[serde(default, alias = "image")]
    pub image_url: Option<String>,
    #[serde(default, alias = "subCategories")]
    pub subcategories: Vec<WireSubCategory>,
}

impl From<WireCategory> for Category {
    fn from(wire: WireCategory) -> Self {
        let mut category = Category::new(wire.id, wire.name)
            .with_subcategories(wire.subcategories.into_iter().map(Into::into).collect());
        category.image_url = wire.image_url;
        category
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireProduct {
    #[serde(alias = "_id", deserialize_with = "string_or_number::deserialize")]
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default, alias = "image")]
    pub image_url: Option<String>,
    #[serde(
        default,
        alias = "category",
        deserialize_with = "string_or_number::deserialize_option"
    )]
    pub category_id: Option<CategoryId>,
    #[serde(
        default,
        alias = "subcategory",
        alias = "subCategory",
        deserialize_with = "string_or_number::deserialize_option"
    )]
    pub sub_category_id: Option<SubCategoryId>,
    #[serde(default)]
    pub description: Option<String>,
}

impl WireProduct {
    pub fn into_product(self, currency: Currency) -> Product {
        let mut product = Product::new(self.id, self.name, Money::from_decimal(self.price, currency));
        product.original_price = self.original_price.map(|p| Money::from_decimal(p, currency));
        product.image_url = self.image_url;
        product.category_id = self.category_id;
        product.sub_category_id = self.sub_category_id;
        product.description = self.description;
        product
    }
}

/// A cart line as the cart endpoints send and receive it.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireCartLine {
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub product_id: ProductId,
    #[serde(default, alias = "name")]
    pub product_name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub quantity: i64,
    #[serde(default, alias = "image", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl WireCartLine {
    pub fn from_line(line: &CartLineItem) -> Self {
        Self {
            product_id: line.product_id.clone(),
            product_name: line.product_name.clone(),
            price: line.price.to_decimal(),
            original_price: line.original_price.map(|p| p.to_decimal()),
            quantity: line.quantity,
            image_url: line.image_url.clone(),
        }
    }

    pub fn into_line(self, currency: Currency) -> CartLineItem {
        CartLineItem {
            product_id: self.product_id,
            product_name: self.product_name,
            price: Money::from_decimal(self.price, currency),
            original_price: self.original_price.map(|p| Money::from_decimal(p, currency)),
            quantity: self.quantity,
            image_url: self.image_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct MergeRequest {
    pub items: Vec<WireCartLine>,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuantityRequest {
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCustomer {
    #[serde(alias = "_id", deserialize_with = "string_or_number::deserialize")]
    pub id: CustomerId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "phone")]
    pub mobile: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, alias = "pincode")]
    pub pin: String,
}

impl From<WireCustomer> for Customer {
    fn from(wire: WireCustomer) -> Self {
        Customer {
            id: wire.id,
            name: wire.name,
            email: wire.email,
            mobile: wire.mobile,
            city: wire.city,
            pin: wire.pin,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireReview {
    #[serde(alias = "_id", deserialize_with = "string_or_number::deserialize")]
    pub id: ReviewId,
    #[serde(default, deserialize_with = "string_or_number::deserialize_option")]
    pub product_id: Option<ProductId>,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default, alias = "user", alias = "userName")]
    pub author: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl WireReview {
    /// Reviews listed under a product may omit their product id.
    pub fn into_review(self, product_id: &ProductId) -> Review {
        Review {
            id: self.id,
            product_id: self.product_id.unwrap_or_else(|| product_id.clone()),
            rating: self.rating,
            comment: self.comment,
            author: self.author,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ReviewRequest<'a> {
    pub rating: u8,
    pub comment: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EmailRequest<'a> {
    pub email: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_from_wire() {
        let wire: WireProduct = serde_json::from_value(json!({
            "_id": 12,
            "name": "Cotton Kurta",
            "price": 799.0,
            "originalPrice": 999.0,
            "image": "https://cdn.example.com/kurta.jpg",
            "category": "men"
        }))
        .unwrap();

        let product = wire.into_product(Currency::INR);
        assert_eq!(product.id.as_str(), "12");
        assert_eq!(product.price.amount_cents, 79900);
        assert_eq!(product.original_price.map(|p| p.amount_cents), Some(99900));
        assert_eq!(product.category_id, Some(CategoryId::new("men")));
        assert_eq!(product.sub_category_id, None);
        assert_eq!(product.discount_percent(), Some(20));
    }

    #[test]
    fn test_category_with_subcategories() {
        let wire: WireCategory = serde_json::from_value(json!({
            "id": "women",
            "name": "Women",
            "subCategories": [{"id": 1, "name": "Sarees"}]
        }))
        .unwrap();

        let category = Category::from(wire);
        assert_eq!(category.subcategories.len(), 1);
        assert_eq!(category.subcategories[0].id.as_str(), "1");
        assert_eq!(category.image_url, None);
    }

    #[test]
    fn test_cart_line_camel_case() {
        let line = CartLineItem::new(
            ProductId::new("p-1"),
            "Kurta",
            Money::new(79900, Currency::INR),
            2,
        );
        let value = serde_json::to_value(WireCartLine::from_line(&line)).unwrap();
        assert_eq!(
            value,
            json!({"productId": "p-1", "productName": "Kurta", "price": 799.0, "quantity": 2})
        );

        let back: WireCartLine = serde_json::from_value(value).unwrap();
        assert_eq!(back.into_line(Currency::INR), line);
    }

    #[test]
    fn test_review_defaults_product_id() {
        let wire: WireReview = serde_json::from_value(json!({
            "id": "r1",
            "rating": 4,
            "comment": "Good fabric, fits well",
            "createdAt": "2024-03-01T10:00:00Z"
        }))
        .unwrap();

        let review = wire.into_review(&ProductId::new("p-9"));
        assert_eq!(review.product_id.as_str(), "p-9");
        assert!(review.created_at.is_some());
    }
}
