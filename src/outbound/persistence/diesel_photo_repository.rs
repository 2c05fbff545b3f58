//! PostgreSQL-backed `BarPhotoRepository`.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::photo::{BarPhoto, NewBarPhoto};
use crate::domain::ports::{BarPhotoRepository, PhotoPersistenceError};

use super::error_map::{map_diesel_error, map_pool_error};
use super::models::{BarPhotoRow, NewBarPhotoRow};
use super::pool::{DbPool, PoolError};
use super::schema::{bar_photos, bars};

/// Diesel implementation of the bar photo store.
#[derive(Clone)]
pub struct DieselBarPhotoRepository {
    pool: DbPool,
}

impl DieselBarPhotoRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> PhotoPersistenceError {
    map_pool_error(error, PhotoPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> PhotoPersistenceError {
    map_diesel_error(
        error,
        PhotoPersistenceError::query,
        PhotoPersistenceError::connection,
    )
}

#[async_trait]
impl BarPhotoRepository for DieselBarPhotoRepository {
    async fn list_for_bar(&self, bar_id: Uuid) -> Result<Vec<BarPhoto>, PhotoPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<BarPhotoRow> = bar_photos::table
            .filter(bar_photos::bar_id.eq(bar_id))
            .order(bar_photos::created_at.desc())
            .select(BarPhotoRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(BarPhoto::from).collect())
    }

    async fn create(&self, photo: &NewBarPhoto) -> Result<BarPhoto, PhotoPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let bar_exists: bool = diesel::select(exists(
            bars::table.filter(bars::id.eq(photo.bar_id)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(diesel_error)?;
        if !bar_exists {
            return Err(PhotoPersistenceError::BarNotFound);
        }

        let row = NewBarPhotoRow {
            id: Uuid::new_v4(),
            bar_id: photo.bar_id,
            user_id: Some(*photo.user_id.as_uuid()),
            image_url: &photo.image_url,
            caption: photo.caption.as_deref(),
        };
        let inserted: BarPhotoRow = diesel::insert_into(bar_photos::table)
            .values(&row)
            .returning(BarPhotoRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(BarPhoto::from(inserted))
    }
}
