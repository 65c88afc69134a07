//! Domain errors.

use thiserror::Error;

/// A cart or pricing rule was violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Line quantities start at one.
    #[error("Quantity must be at least 1, got {0}.")]
    InvalidQuantity(i64),

    #[error("Quantity {0} is more than the {1} allowed per item.")]
    QuantityExceedsLimit(i64, i64),

    /// Cart lines priced in different currencies.
    #[error("Cart mixes currencies: {expected} and {got}.")]
    CurrencyMismatch { expected: String, got: String },

    #[error("Amount is too large.")]
    Overflow,
}
