//! Review list header.

use bazaar_commerce::review::{average_rating, Review};
use serde::Serialize;

/// Shown above an empty review list.
pub const NO_REVIEWS_MESSAGE: &str = "No reviews yet. Be the first to review this product.";

/// Average rating and count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub count: usize,
    /// Average rating to one decimal place, `None` without reviews.
    pub average: Option<String>,
    /// Filled stars out of five, rounded.
    pub stars: u8,
}

impl ReviewSummary {
    pub fn new(reviews: &[Review]) -> Self {
        let average = average_rating(reviews);
        Self {
            count: reviews.len(),
            average: average.map(|a| format!("{:.1}", a)),
            stars: average.map_or(0, |a| a.round().clamp(0.0, 5.0) as u8),
        }
    }

    /// Header line, e.g. `"4.5 (2 reviews)"`.
    pub fn headline(&self) -> String {
        match &self.average {
            None => NO_REVIEWS_MESSAGE.to_string(),
            Some(average) if self.count == 1 => format!("{} (1 review)", average),
            Some(average) => format!("{} ({} reviews)", average, self.count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_commerce::{ProductId, ReviewId};

    fn review(rating: u8) -> Review {
        Review {
            id: ReviewId::new(format!("r{}", rating)),
            product_id: ProductId::new("p-1"),
            rating,
            comment: "Fits as expected".to_string(),
            author: None,
            created_at: None,
        }
    }

    #[test]
    fn test_summary() {
        let summary = ReviewSummary::new(&[review(4), review(5)]);
        assert_eq!(summary.average.as_deref(), Some("4.5"));
        assert_eq!(summary.stars, 5);
        assert_eq!(summary.headline(), "4.5 (2 reviews)");
    }

    #[test]
    fn test_empty() {
        let summary = ReviewSummary::new(&[]);
        assert_eq!(summary.stars, 0);
        assert_eq!(summary.headline(), NO_REVIEWS_MESSAGE);
    }
}
