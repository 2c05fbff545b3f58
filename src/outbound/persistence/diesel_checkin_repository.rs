//! PostgreSQL-backed `CheckInRepository`.
//!
//! Recording a check-in inserts the row and credits the user's points in
//! one transaction; the level is rederived from the new total in the same
//! statement.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};
use scoped_futures::ScopedFutureExt;
use uuid::Uuid;

use crate::domain::checkin::{CheckIn, NewCheckIn};
use crate::domain::ports::{CheckInPersistenceError, CheckInRepository};
use crate::domain::user::UserId;

use super::error_map::{map_diesel_error, map_pool_error};
use super::models::{CheckInRow, NewCheckInRow};
use super::pool::{DbPool, PoolError};
use super::schema::{bars, check_ins, users};

/// Diesel implementation of the check-in store.
#[derive(Clone)]
pub struct DieselCheckInRepository {
    pool: DbPool,
}

impl DieselCheckInRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

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

fn pool_error(error: PoolError) -> CheckInPersistenceError {
    map_pool_error(error, CheckInPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CheckInPersistenceError {
    map_diesel_error(
        error,
        CheckInPersistenceError::query,
        CheckInPersistenceError::connection,
    )
}

fn tx_error(error: TxError) -> CheckInPersistenceError {
    match error {
        TxError::BarNotFound => CheckInPersistenceError::BarNotFound,
        TxError::Diesel(error) => diesel_error(error),
    }
}

#[async_trait]
impl CheckInRepository for DieselCheckInRepository {
    async fn record(&self, check_in: &NewCheckIn) -> Result<CheckIn, CheckInPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = conn
            .transaction(|conn| {
                async move {
                    let exists: Option<Uuid> = bars::table
                        .find(check_in.bar_id)
                        .select(bars::id)
                        .first(conn)
                        .await
                        .optional()?;
                    if exists.is_none() {
                        return Err(TxError::BarNotFound);
                    }

                    let new_row = NewCheckInRow {
                        id: Uuid::new_v4(),
                        bar_id: check_in.bar_id,
                        user_id: *check_in.user_id.as_uuid(),
                        note: check_in.note.as_deref(),
                        photo_url: check_in.photo_url.as_deref(),
                        points: check_in.points,
                    };
                    let inserted: CheckInRow = diesel::insert_into(check_ins::table)
                        .values(&new_row)
                        .returning(CheckInRow::as_returning())
                        .get_result(conn)
                        .await?;

                    // Credit the award and rederive the level atomically.
                    diesel::update(users::table.find(check_in.user_id.as_uuid()))
                        .set((
                            users::points.eq(users::points + check_in.points),
                            users::level.eq((users::points + check_in.points) / 100 + 1),
                            users::updated_at.eq(Utc::now()),
                        ))
                        .execute(conn)
                        .await?;

                    Ok::<_, TxError>(inserted)
                }
                .scope_boxed()
            })
            .await
            .map_err(tx_error)?;
        Ok(CheckIn::from(row))
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CheckIn>, CheckInPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<CheckInRow> = check_ins::table
            .filter(check_ins::user_id.eq(user_id.as_uuid()))
            .order(check_ins::created_at.desc())
            .select(CheckInRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(CheckIn::from).collect())
    }

    async fn list_for_bar(&self, bar_id: Uuid) -> Result<Vec<CheckIn>, CheckInPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<CheckInRow> = check_ins::table
            .filter(check_ins::bar_id.eq(bar_id))
            .order(check_ins::created_at.desc())
            .select(CheckInRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(CheckIn::from).collect())
    }
}
