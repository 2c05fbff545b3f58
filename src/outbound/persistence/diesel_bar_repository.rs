//! PostgreSQL-backed `BarRepository` with PostGIS proximity search.
//!
//! The `bars.geom` geography column lives outside the Diesel schema and is
//! maintained with raw SQL in the same transaction as the row write. A
//! partial update carrying only one coordinate updates that column but
//! leaves the geometry untouched.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{Float8, Uuid as SqlUuid};
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use scoped_futures::ScopedFutureExt;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::bar::{Bar, BarUpdate, Coordinates, NewBar};
use crate::domain::ports::{BarPersistenceError, BarRepository};
use crate::domain::slug::slugify;

use super::error_map::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{BarChangeset, BarRow, NewBarRow};
use super::pool::{DbPool, PoolError};
use super::schema::bars;

/// Column list matching [`BarRow`]; raw queries must select exactly these.
const BAR_COLUMNS: &str = "id, name, slug, description, address, city, state, zip_code, \
     latitude, longitude, phone, website, image_url, hours, amenities, \
     offers_kava, offers_kratom, vibe, is_verified, \
     average_rating, review_count, created_at, updated_at";

/// Diesel implementation of the bar catalog store.
#[derive(Clone)]
pub struct DieselBarRepository {
    pool: DbPool,
}

impl DieselBarRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> BarPersistenceError {
    map_pool_error(error, BarPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> BarPersistenceError {
    if is_unique_violation(&error, Some("bars_slug_key")) {
        return BarPersistenceError::DuplicateSlug;
    }
    map_diesel_error(
        error,
        BarPersistenceError::query,
        BarPersistenceError::connection,
    )
}

/// Write the geography column from the row's coordinates.
async fn refresh_geom(
    conn: &mut AsyncPgConnection,
    id: Uuid,
    coordinates: Coordinates,
) -> Result<(), diesel::result::Error> {
    diesel::sql_query(
        "UPDATE bars SET geom = ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography WHERE id = $3",
    )
    .bind::<Float8, _>(coordinates.longitude())
    .bind::<Float8, _>(coordinates.latitude())
    .bind::<SqlUuid, _>(id)
    .execute(conn)
    .await?;
    Ok(())
}

#[async_trait]
impl BarRepository for DieselBarRepository {
    async fn list(&self, limit: i64) -> Result<Vec<Bar>, BarPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<BarRow> = bars::table
            .order((bars::average_rating.desc(), bars::review_count.desc()))
            .limit(limit)
            .select(BarRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(Bar::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bar>, BarPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<BarRow> = bars::table
            .find(id)
            .select(BarRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(Bar::from))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Bar>, BarPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<BarRow> = bars::table
            .filter(bars::slug.eq(slug))
            .select(BarRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(Bar::from))
    }

    async fn nearby(
        &self,
        center: Coordinates,
        radius_km: f64,
    ) -> Result<Vec<Bar>, BarPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let sql = format!(
            "SELECT {BAR_COLUMNS} FROM bars \
             WHERE geom IS NOT NULL \
               AND ST_DWithin(geom, ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography, $3) \
             ORDER BY ST_Distance(geom, ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography)"
        );
        let rows: Vec<BarRow> = diesel::sql_query(sql)
            .bind::<Float8, _>(center.longitude())
            .bind::<Float8, _>(center.latitude())
            .bind::<Float8, _>(radius_km * 1000.0)
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(Bar::from).collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<Bar>, BarPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let sql = format!(
            "SELECT {BAR_COLUMNS} FROM bars \
             WHERE to_tsvector('english', name || ' ' || coalesce(description, '') || ' ' || city) \
                   @@ plainto_tsquery('english', $1) \
             ORDER BY average_rating DESC, review_count DESC"
        );
        let rows: Vec<BarRow> = diesel::sql_query(sql)
            .bind::<diesel::sql_types::Text, _>(query)
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(Bar::from).collect())
    }

    async fn create(&self, bar: &NewBar) -> Result<Bar, BarPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let slug = slugify(&bar.name);
        let amenities = Value::from(bar.amenities.clone());
        let coordinates = Coordinates::new(bar.latitude, bar.longitude)
            .map_err(|err| BarPersistenceError::query(err.to_string()))?;
        let inserted: BarRow = conn
            .transaction(|conn| {
                async move {
                    let row = NewBarRow {
                        id: Uuid::new_v4(),
                        name: &bar.name,
                        slug: &slug,
                        description: bar.description.as_deref(),
                        address: &bar.address,
                        city: &bar.city,
                        state: &bar.state,
                        zip_code: bar.zip_code.as_deref(),
                        latitude: bar.latitude,
                        longitude: bar.longitude,
                        phone: bar.phone.as_deref(),
                        website: bar.website.as_deref(),
                        image_url: bar.image_url.as_deref(),
                        hours: bar.hours.as_ref(),
                        amenities: &amenities,
                        offers_kava: bar.offers_kava,
                        offers_kratom: bar.offers_kratom,
                        vibe: bar.vibe.as_deref(),
                    };
                    let inserted: BarRow = diesel::insert_into(bars::table)
                        .values(&row)
                        .returning(BarRow::as_returning())
                        .get_result(conn)
                        .await?;
                    refresh_geom(conn, inserted.id, coordinates).await?;
                    Ok::<_, diesel::result::Error>(inserted)
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;
        Ok(Bar::from(inserted))
    }

    async fn update(
        &self,
        id: Uuid,
        update: &BarUpdate,
    ) -> Result<Option<Bar>, BarPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let moved = match update.moved() {
            Some(result) => {
                Some(result.map_err(|err| BarPersistenceError::query(err.to_string()))?)
            }
            None => None,
        };
        let changeset = BarChangeset::from_update(update);
        let updated: Option<BarRow> = conn
            .transaction(|conn| {
                async move {
                    let updated: Option<BarRow> = diesel::update(bars::table.find(id))
                        .set(&changeset)
                        .returning(BarRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()?;
                    if let (Some(row), Some(coordinates)) = (&updated, moved) {
                        refresh_geom(conn, row.id, coordinates).await?;
                    }
                    Ok::<_, diesel::result::Error>(updated)
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;
        Ok(updated.map(Bar::from))
    }
}
