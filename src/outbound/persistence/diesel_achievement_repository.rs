//! PostgreSQL-backed `AchievementRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::achievement::{Achievement, UserAchievement};
use crate::domain::ports::{AchievementPersistenceError, AchievementRepository};
use crate::domain::user::UserId;

use super::error_map::{map_diesel_error, map_pool_error};
use super::models::{AchievementRow, NewUserAchievementRow, UserAchievementRow};
use super::pool::{DbPool, PoolError};
use super::schema::{achievements, user_achievements};

/// Diesel implementation of the achievement store.
#[derive(Clone)]
pub struct DieselAchievementRepository {
    pool: DbPool,
}

impl DieselAchievementRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> AchievementPersistenceError {
    map_pool_error(error, AchievementPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> AchievementPersistenceError {
    map_diesel_error(
        error,
        AchievementPersistenceError::query,
        AchievementPersistenceError::connection,
    )
}

#[async_trait]
impl AchievementRepository for DieselAchievementRepository {
    async fn list_active(&self) -> Result<Vec<Achievement>, AchievementPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<AchievementRow> = achievements::table
            .filter(achievements::is_active.eq(true))
            .order(achievements::points_required.asc())
            .select(AchievementRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(Achievement::from).collect())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<UserAchievement>, AchievementPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<UserAchievementRow> = user_achievements::table
            .filter(user_achievements::user_id.eq(user_id.as_uuid()))
            .order(user_achievements::earned_at.desc())
            .select(UserAchievementRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(UserAchievement::from).collect())
    }

    async fn grant(
        &self,
        user_id: &UserId,
        achievement_id: Uuid,
    ) -> Result<UserAchievement, AchievementPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewUserAchievementRow {
            id: Uuid::new_v4(),
            user_id: *user_id.as_uuid(),
            achievement_id,
        };
        let inserted: UserAchievementRow = diesel::insert_into(user_achievements::table)
            .values(&row)
            .returning(UserAchievementRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(UserAchievement::from(inserted))
    }
}
