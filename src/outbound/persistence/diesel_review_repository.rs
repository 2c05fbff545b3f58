//! PostgreSQL-backed `ReviewRepository`.
//!
//! `create_and_refresh` locks the bar row with `SELECT ... FOR UPDATE`
//! before inserting, so concurrent reviews of the same bar serialise and
//! the recomputed aggregate always reflects every committed review.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::dsl::{avg, count_star};
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};
use scoped_futures::ScopedFutureExt;
use uuid::Uuid;

use crate::domain::ports::{ReviewPersistenceError, ReviewRepository};
use crate::domain::review::{NewReview, RatingSummary, Review};
use crate::domain::user::UserId;

use super::error_map::{map_diesel_error, map_pool_error};
use super::models::{NewReviewRow, ReviewRow};
use super::pool::{DbPool, PoolError};
use super::schema::{bars, reviews};

/// Diesel implementation of the review store.
#[derive(Clone)]
pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Internal transaction error distinguishing the missing-bar case.
#[derive(Debug)]
enum TxError {
    Diesel(diesel::result::Error),
    BarNotFound,
}

impl From<diesel::result::Error> for TxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

fn pool_error(error: PoolError) -> ReviewPersistenceError {
    map_pool_error(error, ReviewPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ReviewPersistenceError {
    map_diesel_error(
        error,
        ReviewPersistenceError::query,
        ReviewPersistenceError::connection,
    )
}

fn tx_error(error: TxError) -> ReviewPersistenceError {
    match error {
        TxError::BarNotFound => ReviewPersistenceError::BarNotFound,
        TxError::Diesel(error) => diesel_error(error),
    }
}

fn into_domain(row: ReviewRow) -> Result<Review, ReviewPersistenceError> {
    Review::try_from(row).map_err(ReviewPersistenceError::query)
}

#[async_trait]
impl ReviewRepository for DieselReviewRepository {
    async fn list_for_bar(&self, bar_id: Uuid) -> Result<Vec<Review>, ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<ReviewRow> = reviews::table
            .filter(reviews::bar_id.eq(bar_id))
            .order(reviews::created_at.desc())
            .select(ReviewRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(into_domain).collect()
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Review>, ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<ReviewRow> = reviews::table
            .filter(reviews::user_id.eq(user_id.as_uuid()))
            .order(reviews::created_at.desc())
            .select(ReviewRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(into_domain).collect()
    }

    async fn create_and_refresh(
        &self,
        review: &NewReview,
    ) -> Result<(Review, RatingSummary), ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let (row, summary) = conn
            .transaction(|conn| {
                async move {
                    // Lock the bar row so concurrent inserts serialise.
                    let locked: Option<Uuid> = bars::table
                        .find(review.bar_id)
                        .select(bars::id)
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;
                    if locked.is_none() {
                        return Err(TxError::BarNotFound);
                    }

                    let new_row = NewReviewRow {
                        id: Uuid::new_v4(),
                        bar_id: review.bar_id,
                        user_id: *review.user_id.as_uuid(),
                        rating: review.rating.value(),
                        comment: review.comment.as_deref(),
                        photo_url: review.photo_url.as_deref(),
                    };
                    let inserted: ReviewRow = diesel::insert_into(reviews::table)
                        .values(&new_row)
                        .returning(ReviewRow::as_returning())
                        .get_result(conn)
                        .await?;

                    // Recompute from the full review set, not incrementally.
                    let (average, count): (Option<BigDecimal>, i64) = reviews::table
                        .filter(reviews::bar_id.eq(review.bar_id))
                        .select((avg(reviews::rating), count_star()))
                        .first(conn)
                        .await?;
                    let average = average.unwrap_or_else(|| BigDecimal::from(0)).with_scale(2);
                    let count = i32::try_from(count).unwrap_or(i32::MAX);

                    diesel::update(bars::table.find(review.bar_id))
                        .set((
                            bars::average_rating.eq(&average),
                            bars::review_count.eq(count),
                            bars::updated_at.eq(Utc::now()),
                        ))
                        .execute(conn)
                        .await?;

                    Ok::<_, TxError>((
                        inserted,
                        RatingSummary {
                            average_rating: average,
                            review_count: count,
                        },
                    ))
                }
                .scope_boxed()
            })
            .await
            .map_err(tx_error)?;
        Ok((into_domain(row)?, summary))
    }
}
