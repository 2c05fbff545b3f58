//! Persistence port for favorites.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::favorite::Favorite;
use crate::domain::user::UserId;

/// Errors surfaced by [`FavoriteRepository`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum FavoritePersistenceError {
    #[error("failed to acquire database connection: {0}")]
    Connection(String),
    #[error("favorite query failed: {0}")]
    Query(String),
}

impl FavoritePersistenceError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }
}

/// Store of (user, bar) favorite rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Favorites saved by a user, newest first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Favorite>, FavoritePersistenceError>;

    /// Whether the pair is currently favorited.
    async fn contains(
        &self,
        user_id: &UserId,
        bar_id: Uuid,
    ) -> Result<bool, FavoritePersistenceError>;

    async fn insert(
        &self,
        user_id: &UserId,
        bar_id: Uuid,
    ) -> Result<Favorite, FavoritePersistenceError>;

    async fn remove(&self, user_id: &UserId, bar_id: Uuid)
        -> Result<(), FavoritePersistenceError>;
}
