//! Persistence port for bar listings.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::bar::{Bar, BarUpdate, Coordinates, NewBar};

/// Errors surfaced by [`BarRepository`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum BarPersistenceError {
    #[error("failed to acquire database connection: {0}")]
    Connection(String),
    #[error("bar query failed: {0}")]
    Query(String),
    /// Insert violated the unique slug constraint.
    #[error("a bar with this slug already exists")]
    DuplicateSlug,
}

impl BarPersistenceError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }
}

/// Store of bar listings, including the geospatial and full-text queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BarRepository: Send + Sync {
    /// Top bars ordered by average rating then review count, capped at
    /// `limit` rows.
    async fn list(&self, limit: i64) -> Result<Vec<Bar>, BarPersistenceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bar>, BarPersistenceError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Bar>, BarPersistenceError>;

    /// Bars within `radius_km` of `center`, nearest first.
    async fn nearby(
        &self,
        center: Coordinates,
        radius_km: f64,
    ) -> Result<Vec<Bar>, BarPersistenceError>;

    /// Full-text search over name, description, and city.
    async fn search(&self, query: &str) -> Result<Vec<Bar>, BarPersistenceError>;

    /// Insert a bar, deriving its slug from the name.
    async fn create(&self, bar: &NewBar) -> Result<Bar, BarPersistenceError>;

    /// Apply a partial update. Returns `None` when no bar has this id.
    async fn update(
        &self,
        id: Uuid,
        update: &BarUpdate,
    ) -> Result<Option<Bar>, BarPersistenceError>;
}
