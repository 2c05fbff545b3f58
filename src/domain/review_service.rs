//! Review submission and retrieval.

use std::sync::Arc;

use tracing::error;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::ports::{ReviewPersistenceError, ReviewRepository};
use crate::domain::review::{NewReview, Rating, RatingSummary, Review};
use crate::domain::user::UserId;

/// Coordinates review writes with the rating aggregate they maintain.
pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
}

impl ReviewService {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    /// Submit a review. The bar's aggregate is recomputed in the same
    /// transaction as the insert and returned alongside the new review.
    pub async fn submit(
        &self,
        bar_id: Uuid,
        user_id: UserId,
        rating: i32,
        comment: Option<String>,
        photo_url: Option<String>,
    ) -> Result<(Review, RatingSummary), Error> {
        let rating = Rating::new(rating).map_err(|err| Error::invalid_request(err.to_string()))?;
        let comment = comment.filter(|text| !text.trim().is_empty());
        let review = NewReview {
            bar_id,
            user_id,
            rating,
            comment,
            photo_url,
        };
        self.reviews
            .create_and_refresh(&review)
            .await
            .map_err(map_review_error)
    }

    /// Reviews for a bar, newest first.
    pub async fn for_bar(&self, bar_id: Uuid) -> Result<Vec<Review>, Error> {
        self.reviews
            .list_for_bar(bar_id)
            .await
            .map_err(map_review_error)
    }

    /// Reviews written by a user, newest first.
    pub async fn for_user(&self, user_id: &UserId) -> Result<Vec<Review>, Error> {
        self.reviews
            .list_for_user(user_id)
            .await
            .map_err(map_review_error)
    }
}

fn map_review_error(err: ReviewPersistenceError) -> Error {
    match err {
        ReviewPersistenceError::BarNotFound => Error::not_found("Bar not found"),
        ReviewPersistenceError::Connection(cause) => {
            error!(error = %cause, "review store unavailable");
            Error::service_unavailable("Service temporarily unavailable")
        }
        ReviewPersistenceError::Query(cause) => {
            error!(error = %cause, "review query failed");
            Error::internal("Internal server error")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::MockReviewRepository;
    use bigdecimal::BigDecimal;
    use chrono::Utc;
    use std::str::FromStr;

    fn summary(avg: &str, count: i32) -> RatingSummary {
        RatingSummary {
            average_rating: BigDecimal::from_str(avg).expect("decimal"),
            review_count: count,
        }
    }

    #[tokio::test]
    async fn submit_returns_refreshed_aggregate() {
        let mut reviews = MockReviewRepository::new();
        reviews.expect_create_and_refresh().returning(|review| {
            Ok((
                Review {
                    id: Uuid::new_v4(),
                    bar_id: review.bar_id,
                    user_id: review.user_id,
                    rating: review.rating,
                    comment: review.comment.clone(),
                    photo_url: review.photo_url.clone(),
                    is_verified: false,
                    created_at: Utc::now(),
                },
                summary("4.50", 2),
            ))
        });
        let service = ReviewService::new(Arc::new(reviews));
        let (review, aggregate) = service
            .submit(
                Uuid::new_v4(),
                UserId::random(),
                5,
                Some("Strong pour".into()),
                None,
            )
            .await
            .expect("submit succeeds");
        assert_eq!(review.rating.value(), 5);
        assert_eq!(aggregate.review_count, 2);
    }

    #[tokio::test]
    async fn out_of_range_rating_never_reaches_the_store() {
        let service = ReviewService::new(Arc::new(MockReviewRepository::new()));
        let err = service
            .submit(Uuid::new_v4(), UserId::random(), 6, None, None)
            .await
            .expect_err("rating rejected");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn blank_comment_is_dropped() {
        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_create_and_refresh()
            .withf(|review| review.comment.is_none())
            .returning(|review| {
                Ok((
                    Review {
                        id: Uuid::new_v4(),
                        bar_id: review.bar_id,
                        user_id: review.user_id,
                        rating: review.rating,
                        comment: None,
                        photo_url: None,
                        is_verified: false,
                        created_at: Utc::now(),
                    },
                    summary("3.00", 1),
                ))
            });
        let service = ReviewService::new(Arc::new(reviews));
        service
            .submit(Uuid::new_v4(), UserId::random(), 3, Some("   ".into()), None)
            .await
            .expect("submit succeeds");
    }

    #[tokio::test]
    async fn missing_bar_maps_to_not_found() {
        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_create_and_refresh()
            .returning(|_| Err(ReviewPersistenceError::BarNotFound));
        let service = ReviewService::new(Arc::new(reviews));
        let err = service
            .submit(Uuid::new_v4(), UserId::random(), 4, None, None)
            .await
            .expect_err("missing bar rejected");
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
