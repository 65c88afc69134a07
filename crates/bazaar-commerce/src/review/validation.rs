//! Review form validation.
//!
//! Runs before any network call; a draft that fails here is never sent.

use super::{ReviewDraft, MAX_RATING, MIN_COMMENT_CHARS, MIN_RATING};
use serde::Serialize;
use thiserror::Error;

/// Form field a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReviewField {
    Rating,
    Comment,
}

/// A field-level review validation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewValidationError {
    /// No stars selected.
    #[error("Please select a rating.")]
    MissingRating,

    /// Rating outside 1..=5.
    #[error("Rating must be between 1 and 5.")]
    RatingOutOfRange(u8),

    /// Comment too short after trimming.
    #[error("Comment must be at least 10 characters long.")]
    CommentTooShort { length: usize },
}

impl ReviewValidationError {
    /// The field to show this message next to.
    pub fn field(&self) -> ReviewField {
        match self {
            ReviewValidationError::MissingRating | ReviewValidationError::RatingOutOfRange(_) => {
                ReviewField::Rating
            }
            ReviewValidationError::CommentTooShort { .. } => ReviewField::Comment,
        }
    }
}

/// A draft that passed validation, ready to be posted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReviewSubmission {
    pub rating: u8,
    pub comment: String,
}

impl ReviewDraft {
    /// Validate the draft, collecting every field error.
    pub fn validate(&self) -> Result<ReviewSubmission, Vec<ReviewValidationError>> {
        let mut errors = Vec::new();

        if self.rating == 0 {
            errors.push(ReviewValidationError::MissingRating);
        } else if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            errors.push(ReviewValidationError::RatingOutOfRange(self.rating));
        }

        let comment = self.comment.trim();
        let length = comment.chars().count();
        if length < MIN_COMMENT_CHARS {
            errors.push(ReviewValidationError::CommentTooShort { length });
        }

        if errors.is_empty() {
            Ok(ReviewSubmission {
                rating: self.rating,
                comment: comment.to_string(),
            })
        } else {
            Err(errors)
        }
    }
}
