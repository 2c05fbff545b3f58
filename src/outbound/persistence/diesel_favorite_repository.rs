//! PostgreSQL-backed `FavoriteRepository`.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::favorite::Favorite;
use crate::domain::ports::{FavoritePersistenceError, FavoriteRepository};
use crate::domain::user::UserId;

use super::error_map::{map_diesel_error, map_pool_error};
use super::models::{FavoriteRow, NewFavoriteRow};
use super::pool::{DbPool, PoolError};
use super::schema::favorites;

/// Diesel implementation of the favorites store.
#[derive(Clone)]
pub struct DieselFavoriteRepository {
    pool: DbPool,
}

impl DieselFavoriteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> FavoritePersistenceError {
    map_pool_error(error, FavoritePersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> FavoritePersistenceError {
    map_diesel_error(
        error,
        FavoritePersistenceError::query,
        FavoritePersistenceError::connection,
    )
}

#[async_trait]
impl FavoriteRepository for DieselFavoriteRepository {
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Favorite>, FavoritePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<FavoriteRow> = favorites::table
            .filter(favorites::user_id.eq(user_id.as_uuid()))
            .order(favorites::created_at.desc())
            .select(FavoriteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(Favorite::from).collect())
    }

    async fn contains(
        &self,
        user_id: &UserId,
        bar_id: Uuid,
    ) -> Result<bool, FavoritePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::select(exists(
            favorites::table
                .filter(favorites::user_id.eq(user_id.as_uuid()))
                .filter(favorites::bar_id.eq(bar_id)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(diesel_error)
    }

    async fn insert(
        &self,
        user_id: &UserId,
        bar_id: Uuid,
    ) -> Result<Favorite, FavoritePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewFavoriteRow {
            id: Uuid::new_v4(),
            bar_id,
            user_id: *user_id.as_uuid(),
        };
        let inserted: FavoriteRow = diesel::insert_into(favorites::table)
            .values(&row)
            .returning(FavoriteRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(Favorite::from(inserted))
    }

    async fn remove(
        &self,
        user_id: &UserId,
        bar_id: Uuid,
    ) -> Result<(), FavoritePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::delete(
            favorites::table
                .filter(favorites::user_id.eq(user_id.as_uuid()))
                .filter(favorites::bar_id.eq(bar_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;
        Ok(())
    }
}
