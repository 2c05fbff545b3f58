//! Persistence port for bar photos.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::photo::{BarPhoto, NewBarPhoto};

/// Errors surfaced by [`BarPhotoRepository`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum PhotoPersistenceError {
    #[error("failed to acquire database connection: {0}")]
    Connection(String),
    #[error("photo query failed: {0}")]
    Query(String),
    /// The referenced bar does not exist.
    #[error("bar not found")]
    BarNotFound,
}

impl PhotoPersistenceError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }
}

/// Store of photos attached to bars.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BarPhotoRepository: Send + Sync {
    /// Photos of a bar, newest first.
    async fn list_for_bar(&self, bar_id: Uuid) -> Result<Vec<BarPhoto>, PhotoPersistenceError>;

    /// Insert a photo for an existing bar.
    async fn create(&self, photo: &NewBarPhoto) -> Result<BarPhoto, PhotoPersistenceError>;
}
