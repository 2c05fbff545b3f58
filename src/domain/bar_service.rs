//! Bar catalog queries and writes.

use std::sync::Arc;

use tracing::error;
use uuid::Uuid;

use crate::domain::bar::{Bar, BarUpdate, Coordinates, NewBar};
use crate::domain::error::Error;
use crate::domain::ports::{BarPersistenceError, BarRepository};

/// Default cap on unfiltered bar listings.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Read and write access to the bar catalog.
pub struct BarCatalog {
    bars: Arc<dyn BarRepository>,
}

impl BarCatalog {
    pub fn new(bars: Arc<dyn BarRepository>) -> Self {
        Self { bars }
    }

    /// Top-rated bars, capped at [`DEFAULT_LIST_LIMIT`].
    pub async fn list(&self) -> Result<Vec<Bar>, Error> {
        self.bars
            .list(DEFAULT_LIST_LIMIT)
            .await
            .map_err(map_bar_error)
    }

    pub async fn get(&self, id: Uuid) -> Result<Bar, Error> {
        self.bars
            .find_by_id(id)
            .await
            .map_err(map_bar_error)?
            .ok_or_else(|| Error::not_found("Bar not found"))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Bar, Error> {
        self.bars
            .find_by_slug(slug)
            .await
            .map_err(map_bar_error)?
            .ok_or_else(|| Error::not_found("Bar not found"))
    }

    /// Bars within `radius_km` of the coordinates, nearest first.
    pub async fn nearby(&self, lat: f64, lng: f64, radius_km: f64) -> Result<Vec<Bar>, Error> {
        let center = Coordinates::new(lat, lng)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(Error::invalid_request("radius must be a positive number"));
        }
        self.bars
            .nearby(center, radius_km)
            .await
            .map_err(map_bar_error)
    }

    /// Full-text search over name, description, and city.
    pub async fn search(&self, query: &str) -> Result<Vec<Bar>, Error> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::invalid_request("search query must not be empty"));
        }
        self.bars.search(query).await.map_err(map_bar_error)
    }

    pub async fn create(&self, bar: NewBar) -> Result<Bar, Error> {
        if bar.name.trim().is_empty() {
            return Err(Error::invalid_request("name must not be empty"));
        }
        bar.validate()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.bars.create(&bar).await.map_err(map_bar_error)
    }

    pub async fn update(&self, id: Uuid, update: BarUpdate) -> Result<Bar, Error> {
        if update.is_empty() {
            return Err(Error::invalid_request("update must change at least one field"));
        }
        if let Some(coordinates) = update.moved() {
            coordinates.map_err(|err| Error::invalid_request(err.to_string()))?;
        }
        self.bars
            .update(id, &update)
            .await
            .map_err(map_bar_error)?
            .ok_or_else(|| Error::not_found("Bar not found"))
    }
}

fn map_bar_error(err: BarPersistenceError) -> Error {
    match err {
        // No collision retry exists, so a duplicate slug is an unexpected
        // unique violation rather than a client-addressable conflict.
        BarPersistenceError::DuplicateSlug => {
            error!("bar slug collision on insert");
            Error::internal("Internal server error")
        }
        BarPersistenceError::Connection(cause) => {
            error!(error = %cause, "bar store unavailable");
            Error::service_unavailable("Service temporarily unavailable")
        }
        BarPersistenceError::Query(cause) => {
            error!(error = %cause, "bar query failed");
            Error::internal("Internal server error")
        }
    }
}
