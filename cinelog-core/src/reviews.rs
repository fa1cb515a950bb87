//! Review submission validation.
//!
//! All checks run before any storage call; a draft that fails here never
//! reaches the database.

use serde::Deserialize;
use thiserror::Error;

/// Minimum review body length, counted in characters after trimming.
pub const MIN_BODY_CHARS: usize = 10;
/// Maximum review body length in characters.
pub const MAX_BODY_CHARS: usize = 1000;
/// Lowest selectable star rating.
pub const MIN_RATING: i16 = 1;
/// Highest selectable star rating.
pub const MAX_RATING: i16 = 5;

/// Raw review submission as received from a client.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewDraft {
    /// Selected star rating; `None` when the client sent no selection.
    pub rating: Option<i16>,
    pub body: String,
}

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidReview {
    pub rating: i16,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewValidationError {
    #[error("Please select a star rating before submitting.")]
    RatingMissing,

    #[error("Rating must be between {MIN_RATING} and {MAX_RATING} stars.")]
    RatingOutOfRange,

    #[error("Please write at least {MIN_BODY_CHARS} characters.")]
    BodyTooShort,

    #[error("Reviews are limited to {MAX_BODY_CHARS} characters.")]
    BodyTooLong,
}

impl ReviewDraft {
    /// Validate the draft, returning the submission-ready form.
    ///
    /// Length checks count characters, not bytes, so multi-byte text is
    /// measured the way users see it.
    pub fn validate(self) -> Result<ValidReview, ReviewValidationError> {
        let rating = self.rating.ok_or(ReviewValidationError::RatingMissing)?;
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ReviewValidationError::RatingOutOfRange);
        }

        if self.body.trim().chars().count() < MIN_BODY_CHARS {
            return Err(ReviewValidationError::BodyTooShort);
        }
        if self.body.chars().count() > MAX_BODY_CHARS {
            return Err(ReviewValidationError::BodyTooLong);
        }

        Ok(ValidReview {
            rating,
            body: self.body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(rating: Option<i16>, body: &str) -> ReviewDraft {
        ReviewDraft {
            rating,
            body: body.to_string(),
        }
    }

    #[test]
    fn missing_rating_is_rejected() {
        assert_eq!(
            draft(None, "plenty of characters here").validate(),
            Err(ReviewValidationError::RatingMissing)
        );
    }

    #[test]
    fn out_of_range_ratings_are_rejected() {
        for rating in [0, 6, -1] {
            assert_eq!(
                draft(Some(rating), "plenty of characters here").validate(),
                Err(ReviewValidationError::RatingOutOfRange)
            );
        }
    }

    #[test]
    fn body_length_boundary_is_ten_characters() {
        assert_eq!(
            draft(Some(4), "123456789").validate(),
            Err(ReviewValidationError::BodyTooShort)
        );
        assert!(draft(Some(4), "1234567890").validate().is_ok());
    }

    #[test]
    fn trimmed_length_decides_the_short_check() {
        // Nine visible characters padded with whitespace still fail.
        assert_eq!(
            draft(Some(4), "  123456789  ").validate(),
            Err(ReviewValidationError::BodyTooShort)
        );
    }

    #[test]
    fn body_length_cap_is_one_thousand() {
        assert!(draft(Some(3), &"x".repeat(1000)).validate().is_ok());
        assert_eq!(
            draft(Some(3), &"x".repeat(1001)).validate(),
            Err(ReviewValidationError::BodyTooLong)
        );
    }

    #[test]
    fn multibyte_text_is_counted_per_character() {
        // Ten umlauts are ten characters even though they are twenty bytes.
        assert!(draft(Some(5), &"ü".repeat(10)).validate().is_ok());
    }
}
