//! Reviews and the rating aggregate recomputed from them.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::user::UserId;

/// Validation errors for review value types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewValidationError {
    #[error("rating must be between 1 and 5")]
    RatingOutOfRange,
}

/// Integer star rating constrained to 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "i32", into = "i32")]
pub struct Rating(i32);

impl Rating {
    pub fn new(value: i32) -> Result<Self, ReviewValidationError> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ReviewValidationError::RatingOutOfRange)
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Rating {
    type Error = ReviewValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i32 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// A user's review of a bar.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub bar_id: Uuid,
    pub user_id: UserId,
    pub rating: Rating,
    pub comment: Option<String>,
    pub photo_url: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a review.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub bar_id: Uuid,
    pub user_id: UserId,
    pub rating: Rating,
    pub comment: Option<String>,
    pub photo_url: Option<String>,
}

/// The rating aggregate recomputed after every review insert.
///
/// Derived exclusively from the full set of a bar's reviews; the pair is
/// written back to the bar row in the same transaction as the insert.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    /// Numeric(3,2) average; serialised as a string.
    #[schema(value_type = String, example = "4.50")]
    pub average_rating: BigDecimal,
    pub review_count: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, true)]
    #[case(5, true)]
    #[case(0, false)]
    #[case(6, false)]
    #[case(-3, false)]
    fn rating_bounds(#[case] value: i32, #[case] ok: bool) {
        assert_eq!(Rating::new(value).is_ok(), ok);
    }

    #[test]
    fn rating_deserialises_through_try_from() {
        let rating: Rating = serde_json::from_str("4").expect("valid rating");
        assert_eq!(rating.value(), 4);
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }
}
