//! Cart and line item types.

use crate::cart::{CartPricing, LineItemPricing};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A shopping cart: line items keyed by product, in insertion order.
///
/// Every item has `quantity >= 1`; driving a quantity to zero or below
/// removes the line instead of keeping it at zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLineItem>", into = "Vec<CartLineItem>")]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from raw line items, e.g. a server response.
    ///
    /// Lines with a quantity below one are dropped. Duplicate product ids are
    /// folded into the first occurrence with their quantities summed and
    /// capped at [`MAX_QUANTITY_PER_ITEM`].
    pub fn from_items(items: impl IntoIterator<Item = CartLineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity < 1 {
                continue;
            }
            if let Some(existing) = cart.get_mut(&item.product_id) {
                existing.quantity = existing
                    .quantity
                    .saturating_add(item.quantity)
                    .min(MAX_QUANTITY_PER_ITEM);
            } else {
                let mut item = item;
                item.quantity = item.quantity.min(MAX_QUANTITY_PER_ITEM);
                cart.items.push(item);
            }
        }
        cart
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Consume the cart and return its items.
    pub fn into_items(self) -> Vec<CartLineItem> {
        self.items
    }

    /// Add an item to the cart.
    ///
    /// If the product is already present its quantity is incremented.
    /// Returns an error if the quantity is not positive or the resulting
    /// quantity would exceed [`MAX_QUANTITY_PER_ITEM`].
    pub fn add_item(&mut self, item: CartLineItem) -> Result<(), CommerceError> {
        if item.quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(item.quantity));
        }

        if let Some(existing) = self.get_mut(&item.product_id) {
            let new_quantity = existing
                .quantity
                .checked_add(item.quantity)
                .ok_or(CommerceError::Overflow)?;
            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            existing.quantity = new_quantity;
            return Ok(());
        }

        if item.quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                item.quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        self.items.push(item);
        Ok(())
    }

    /// Set the quantity of a line.
    ///
    /// A quantity below one removes the line. Returns whether the cart
    /// changed; setting the quantity of an absent product is a no-op.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity < 1 {
            return Ok(self.remove(product_id));
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        match self.get_mut(product_id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a line. Removing an absent product returns `false`.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.product_id != product_id);
        self.items.len() < len_before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by product ID.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Check whether a product is in the cart.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.get(product_id).is_some()
    }

    fn get_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLineItem> {
        self.items.iter_mut().find(|i| &i.product_id == product_id)
    }

    /// Currency of the cart, taken from the first line.
    pub fn currency(&self) -> Currency {
        self.items
            .first()
            .map(|i| i.price.currency)
            .unwrap_or_default()
    }

    /// Compute the derived display values for the whole cart.
    ///
    /// This is recomputed on every call; nothing is cached on the cart.
    pub fn pricing(&self) -> Result<CartPricing, CommerceError> {
        let currency = self.currency();
        if let Some(other) = self.items.iter().find(|i| i.price.currency != currency) {
            return Err(CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: other.price.currency.code().to_string(),
            });
        }

        let line_items = self
            .items
            .iter()
            .map(LineItemPricing::for_item)
            .collect::<Result<Vec<_>, _>>()?;

        let total_amount = Money::try_sum(line_items.iter().map(|l| &l.subtotal), currency)
            .ok_or(CommerceError::Overflow)?;
        let total_savings = Money::try_sum(line_items.iter().map(|l| &l.savings), currency)
            .ok_or(CommerceError::Overflow)?;

        Ok(CartPricing {
            total_amount,
            total_item_count: self.item_count(),
            total_savings,
            line_items,
        })
    }
}

impl From<Vec<CartLineItem>> for Cart {
    fn from(items: Vec<CartLineItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<CartLineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Product being purchased; unique within a cart.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub product_name: String,
    /// Current unit price.
    pub price: Money,
    /// Nominal pre-discount unit price, if the product is on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    /// Quantity, at least one.
    pub quantity: i64,
    /// Product image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CartLineItem {
    /// Create a new line item.
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        price: Money,
        quantity: i64,
    ) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            price,
            original_price: None,
            quantity,
            image_url: None,
        }
    }

    /// Set the pre-discount price.
    pub fn with_original_price(mut self, original_price: Money) -> Self {
        self.original_price = Some(original_price);
        self
    }

    /// Set the image URL.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inr(amount: i64) -> Money {
        Money::new(amount, Currency::INR)
    }

    fn item(id: &str, price: i64, quantity: i64) -> CartLineItem {
        CartLineItem::new(ProductId::new(id), format!("Product {id}"), inr(price), quantity)
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 1000, 2)).unwrap();

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_existing_item_increments_quantity() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 1000, 2)).unwrap();
        cart.add_item(item("a", 1000, 3)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&ProductId::new("a")).unwrap().quantity, 5);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.add_item(item("a", 1000, 0)),
            Err(CommerceError::InvalidQuantity(0))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_exceeding_limit() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 1000, MAX_QUANTITY_PER_ITEM)).unwrap();
        assert!(matches!(
            cart.add_item(item("a", 1000, 1)),
            Err(CommerceError::QuantityExceedsLimit(..))
        ));
    }

    #[test]
    fn test_set_quantity_zero_or_negative_removes_line() {
        for quantity in [0, -1, -50] {
            let mut cart = Cart::new();
            cart.add_item(item("a", 1000, 2)).unwrap();
            cart.add_item(item("b", 500, 1)).unwrap();

            assert!(cart.set_quantity(&ProductId::new("a"), quantity).unwrap());

            let ids: Vec<_> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
            assert_eq!(ids, vec!["b"]);
        }
    }

    #[test]
    fn test_set_quantity_on_absent_product_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 1000, 2)).unwrap();
        assert!(!cart.set_quantity(&ProductId::new("zzz"), 4).unwrap());
        assert!(!cart.set_quantity(&ProductId::new("zzz"), 0).unwrap());
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 1000, 2)).unwrap();
        assert!(cart.remove(&ProductId::new("a")));
        assert!(!cart.remove(&ProductId::new("a")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_any_size() {
        let mut empty = Cart::new();
        empty.clear();
        assert!(empty.is_empty());

        let mut cart = Cart::new();
        cart.add_item(item("a", 1000, 2)).unwrap();
        cart.add_item(item("b", 500, 7)).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_from_items_normalizes() {
        let cart = Cart::from_items(vec![
            item("a", 1000, 2),
            item("b", 500, 0),
            item("a", 1000, 3),
        ]);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&ProductId::new("a")).unwrap().quantity, 5);
    }

    #[test]
    fn test_pricing_totals() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 1250, 2)).unwrap();
        cart.add_item(item("b", 999, 3)).unwrap();

        let pricing = cart.pricing().unwrap();
        let sum: i64 = pricing.line_items.iter().map(|l| l.subtotal.amount_cents).sum();
        assert_eq!(pricing.total_amount.amount_cents, 1250 * 2 + 999 * 3);
        assert_eq!(pricing.total_amount.amount_cents, sum);
        assert_eq!(pricing.total_item_count, 5);
    }

    #[test]
    fn test_pricing_rejects_mixed_currency() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 1000, 1)).unwrap();
        cart.add_item(CartLineItem::new(
            ProductId::new("b"),
            "Imported",
            Money::new(1000, Currency::USD),
            1,
        ))
        .unwrap();
        assert!(matches!(
            cart.pricing(),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_serde_roundtrip_drops_invalid_lines() {
        let json = r#"[
            {"productId": "a", "productName": "A", "price": {"amount_cents": 100, "currency": "INR"}, "quantity": 2},
            {"productId": "b", "productName": "B", "price": {"amount_cents": 100, "currency": "INR"}, "quantity": 0}
        ]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.len(), 1);
        assert!(cart.contains(&ProductId::new("a")));
    }
}
