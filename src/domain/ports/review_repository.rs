//! Persistence port for reviews and the rating aggregate.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::review::{NewReview, RatingSummary, Review};
use crate::domain::user::UserId;

/// Errors surfaced by [`ReviewRepository`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum ReviewPersistenceError {
    #[error("failed to acquire database connection: {0}")]
    Connection(String),
    #[error("review query failed: {0}")]
    Query(String),
    /// The referenced bar does not exist.
    #[error("bar not found")]
    BarNotFound,
}

impl ReviewPersistenceError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }
}

/// Store of reviews. Aggregate maintenance is the repository's job: the
/// insert and the recomputed average land in one transaction, serialised
/// per bar so concurrent submissions cannot interleave.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Reviews for a bar, newest first.
    async fn list_for_bar(&self, bar_id: Uuid) -> Result<Vec<Review>, ReviewPersistenceError>;

    /// Reviews written by a user, newest first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Review>, ReviewPersistenceError>;

    /// Insert a review and recompute the bar's rating aggregate from the
    /// full review set, atomically.
    async fn create_and_refresh(
        &self,
        review: &NewReview,
    ) -> Result<(Review, RatingSummary), ReviewPersistenceError>;
}
