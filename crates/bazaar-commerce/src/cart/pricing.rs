//! Derived cart display values.
//!
//! Nothing here is stored: every value is a pure function of the current
//! cart and is recomputed whenever a view asks for it.

use crate::cart::CartLineItem;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Pricing breakdown for a whole cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of `price * quantity` over every line.
    pub total_amount: Money,
    /// Sum of quantities.
    pub total_item_count: i64,
    /// Sum of per-line savings against the original price.
    pub total_savings: Money,
    /// Per-line breakdown, in cart order.
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Check if any line is discounted.
    pub fn has_savings(&self) -> bool {
        self.total_savings.is_positive()
    }
}

/// Pricing breakdown for a single line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    /// Product on this line.
    pub product_id: ProductId,
    /// Unit price.
    pub unit_price: Money,
    /// Original price, only when it is a valid discount reference.
    pub original_price: Option<Money>,
    /// Quantity.
    pub quantity: i64,
    /// `unit_price * quantity`.
    pub subtotal: Money,
    /// Rounded discount badge, e.g. `Some(20)` for "20% off".
    pub discount_percent: Option<u32>,
    /// `(original_price - unit_price) * quantity`, zero without a discount.
    pub savings: Money,
}

impl LineItemPricing {
    /// Derive the pricing of one cart line.
    pub fn for_item(item: &CartLineItem) -> Result<Self, CommerceError> {
        let subtotal = item
            .price
            .try_multiply(item.quantity)
            .ok_or(CommerceError::Overflow)?;

        let original_price = valid_original_price(item.price, item.original_price);
        let savings = match original_price {
            Some(original) => original
                .try_subtract(&item.price)
                .and_then(|per_unit| per_unit.try_multiply(item.quantity))
                .ok_or(CommerceError::Overflow)?,
            None => Money::zero(item.price.currency),
        };

        Ok(Self {
            product_id: item.product_id.clone(),
            unit_price: item.price,
            original_price,
            quantity: item.quantity,
            subtotal,
            discount_percent: discount_percent(item.price, item.original_price),
            savings,
        })
    }
}

/// Return the original price only if it is a usable discount reference:
/// positive, in the same currency, and strictly greater than `price`.
pub fn valid_original_price(price: Money, original_price: Option<Money>) -> Option<Money> {
    original_price.filter(|original| {
        original.is_positive()
            && original.currency == price.currency
            && original.amount_cents > price.amount_cents
    })
}

/// `round((original - price) / original * 100)` for a valid original price.
pub fn discount_percent(price: Money, original_price: Option<Money>) -> Option<u32> {
    let original = valid_original_price(price, original_price)?;
    let off = (original.amount_cents - price.amount_cents) as f64;
    Some((off / original.amount_cents as f64 * 100.0).round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn inr(amount: i64) -> Money {
        Money::new(amount, Currency::INR)
    }

    #[test]
    fn test_discount_percent() {
        assert_eq!(discount_percent(inr(800), Some(inr(1000))), Some(20));
        // 1 - 666/999 = 33.33..%
        assert_eq!(discount_percent(inr(666), Some(inr(999))), Some(33));
        // 1 - 1/3 = 66.66..%
        assert_eq!(discount_percent(inr(100), Some(inr(300))), Some(67));
    }

    #[test]
    fn test_no_discount_without_valid_original() {
        assert_eq!(discount_percent(inr(1000), None), None);
        assert_eq!(discount_percent(inr(1000), Some(inr(1000))), None);
        assert_eq!(discount_percent(inr(1000), Some(inr(900))), None);
        assert_eq!(discount_percent(inr(1000), Some(inr(-5))), None);
        assert_eq!(
            discount_percent(inr(1000), Some(Money::new(2000, Currency::USD))),
            None
        );
    }

    #[test]
    fn test_line_pricing_with_discount() {
        let item = CartLineItem::new(ProductId::new("a"), "A", inr(750), 3)
            .with_original_price(inr(1000));
        let pricing = LineItemPricing::for_item(&item).unwrap();

        assert_eq!(pricing.subtotal.amount_cents, 2250);
        assert_eq!(pricing.discount_percent, Some(25));
        assert_eq!(pricing.savings.amount_cents, 750);
        assert_eq!(pricing.original_price, Some(inr(1000)));
    }

    #[test]
    fn test_line_pricing_invalid_original_has_zero_savings() {
        let item = CartLineItem::new(ProductId::new("a"), "A", inr(750), 3)
            .with_original_price(inr(500));
        let pricing = LineItemPricing::for_item(&item).unwrap();

        assert_eq!(pricing.subtotal.amount_cents, 2250);
        assert_eq!(pricing.discount_percent, None);
        assert!(pricing.savings.is_zero());
        assert_eq!(pricing.original_price, None);
    }
}
