//! Cart page.

use super::discount_badge;
use crate::store::CartState;
use bazaar_commerce::cart::LineItemPricing;
use bazaar_commerce::{CommerceError, ProductId};
use serde::Serialize;

/// One cart row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub image_url: Option<String>,
    pub quantity: i64,
    pub unit_price: String,
    /// Struck-through price, only for a valid discount.
    pub original_price: Option<String>,
    pub discount_badge: Option<String>,
    pub subtotal: String,
    /// Shown only when the line saves something.
    pub savings: Option<String>,
}

/// The cart page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total_amount: String,
    pub total_item_count: i64,
    pub total_savings: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl CartView {
    pub fn from_state(state: &CartState) -> Result<Self, CommerceError> {
        let pricing = state.cart.pricing()?;
        let lines = state
            .cart
            .items()
            .iter()
            .zip(&pricing.line_items)
            .map(|(item, priced)| line_view(item.product_name.clone(), item.image_url.clone(), priced))
            .collect();

        Ok(Self {
            lines,
            total_amount: pricing.total_amount.display(),
            total_item_count: pricing.total_item_count,
            total_savings: pricing
                .has_savings()
                .then(|| pricing.total_savings.display()),
            loading: state.is_loading(),
            error: state.error.clone(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn line_view(name: String, image_url: Option<String>, priced: &LineItemPricing) -> CartLineView {
    CartLineView {
        product_id: priced.product_id.clone(),
        name,
        image_url,
        quantity: priced.quantity,
        unit_price: priced.unit_price.display(),
        original_price: priced.original_price.map(|p| p.display()),
        discount_badge: discount_badge(priced.discount_percent),
        subtotal: priced.subtotal.display(),
        savings: priced.savings.is_positive().then(|| priced.savings.display()),
    }
}
