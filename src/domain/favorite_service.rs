//! Favorite toggling.

use std::sync::Arc;

use tracing::error;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::favorite::Favorite;
use crate::domain::ports::{FavoritePersistenceError, FavoriteRepository};
use crate::domain::user::UserId;

/// Toggles and lists a user's favorite bars.
pub struct FavoriteService {
    favorites: Arc<dyn FavoriteRepository>,
}

impl FavoriteService {
    pub fn new(favorites: Arc<dyn FavoriteRepository>) -> Self {
        Self { favorites }
    }

    /// Flip the favorite state for a (user, bar) pair. Returns the new
    /// state: `true` when the bar is now favorited.
    pub async fn toggle(&self, user_id: &UserId, bar_id: Uuid) -> Result<bool, Error> {
        let currently_favorited = self
            .favorites
            .contains(user_id, bar_id)
            .await
            .map_err(map_favorite_error)?;
        if currently_favorited {
            self.favorites
                .remove(user_id, bar_id)
                .await
                .map_err(map_favorite_error)?;
            Ok(false)
        } else {
            self.favorites
                .insert(user_id, bar_id)
                .await
                .map_err(map_favorite_error)?;
            Ok(true)
        }
    }

    /// Favorites saved by a user, newest first.
    pub async fn for_user(&self, user_id: &UserId) -> Result<Vec<Favorite>, Error> {
        self.favorites
            .list_for_user(user_id)
            .await
            .map_err(map_favorite_error)
    }
}

fn map_favorite_error(err: FavoritePersistenceError) -> Error {
    match err {
        FavoritePersistenceError::Connection(cause) => {
            error!(error = %cause, "favorite store unavailable");
            Error::service_unavailable("Service temporarily unavailable")
        }
        FavoritePersistenceError::Query(cause) => {
            error!(error = %cause, "favorite query failed");
            Error::internal("Internal server error")
        }
    }
}
