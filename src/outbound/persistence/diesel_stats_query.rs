//! PostgreSQL-backed `UserStatsQuery`.

use async_trait::async_trait;
use diesel::dsl::{count_distinct, count_star};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StatsQueryError, UserStatsQuery};
use crate::domain::stats::UserStats;
use crate::domain::user::UserId;

use super::error_map::{map_diesel_error, map_pool_error};
use super::pool::{DbPool, PoolError};
use super::schema::{check_ins, reviews, users};

/// Diesel implementation of the statistics query.
#[derive(Clone)]
pub struct DieselUserStatsQuery {
    pool: DbPool,
}

impl DieselUserStatsQuery {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> StatsQueryError {
    map_pool_error(error, StatsQueryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> StatsQueryError {
    map_diesel_error(error, StatsQueryError::query, StatsQueryError::connection)
}

#[async_trait]
impl UserStatsQuery for DieselUserStatsQuery {
    async fn user_stats(&self, user_id: &UserId) -> Result<UserStats, StatsQueryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let points: Option<i32> = users::table
            .find(user_id.as_uuid())
            .select(users::points)
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        let Some(total_points) = points else {
            return Err(StatsQueryError::UserNotFound);
        };

        let (visited_bars, total_check_ins): (i64, i64) = check_ins::table
            .filter(check_ins::user_id.eq(user_id.as_uuid()))
            .select((count_distinct(check_ins::bar_id), count_star()))
            .first(&mut conn)
            .await
            .map_err(diesel_error)?;

        let total_reviews: i64 = reviews::table
            .filter(reviews::user_id.eq(user_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(UserStats {
            visited_bars,
            total_check_ins,
            total_reviews,
            total_points,
        })
    }
}
