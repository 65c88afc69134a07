//! Product reviews and the client-side submission guard.

mod validation;

pub use validation::{ReviewField, ReviewSubmission, ReviewValidationError};

use crate::ids::{ProductId, ReviewId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest accepted star rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted star rating.
pub const MAX_RATING: u8 = 5;
/// Minimum comment length, counted after trimming.
pub const MIN_COMMENT_CHARS: usize = 10;

/// A published review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    /// Review identifier.
    pub id: ReviewId,
    /// Reviewed product.
    pub product_id: ProductId,
    /// Star rating, 1 to 5.
    pub rating: u8,
    /// Review text.
    pub comment: String,
    /// Display name of the reviewer.
    pub author: Option<String>,
    /// When the review was posted.
    pub created_at: Option<DateTime<Utc>>,
}

/// Review form state before submission.
///
/// A rating of `0` means the user has not picked any stars yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewDraft {
    /// Selected star rating, `0` when unset.
    pub rating: u8,
    /// Comment text as typed.
    pub comment: String,
}

impl ReviewDraft {
    /// Create a draft.
    pub fn new(rating: u8, comment: impl Into<String>) -> Self {
        Self {
            rating,
            comment: comment.into(),
        }
    }
}

/// Average star rating, `None` for an empty list.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    Some(f64::from(total) / reviews.len() as f64)
}
