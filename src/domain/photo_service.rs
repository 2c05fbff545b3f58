//! Bar photo galleries.

use std::sync::Arc;

use tracing::error;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::photo::{BarPhoto, NewBarPhoto};
use crate::domain::ports::{BarPhotoRepository, PhotoPersistenceError};
use crate::domain::user::UserId;

/// Lists and extends the photo gallery of a bar.
pub struct PhotoGallery {
    photos: Arc<dyn BarPhotoRepository>,
}

impl PhotoGallery {
    pub fn new(photos: Arc<dyn BarPhotoRepository>) -> Self {
        Self { photos }
    }

    /// Photos of a bar, newest first.
    pub async fn for_bar(&self, bar_id: Uuid) -> Result<Vec<BarPhoto>, Error> {
        self.photos
            .list_for_bar(bar_id)
            .await
            .map_err(map_photo_error)
    }

    /// Attach a photo to a bar. Blank captions are dropped.
    pub async fn attach(
        &self,
        bar_id: Uuid,
        user_id: UserId,
        image_url: String,
        caption: Option<String>,
    ) -> Result<BarPhoto, Error> {
        if image_url.trim().is_empty() {
            return Err(Error::invalid_request("Image URL is required"));
        }
        let photo = NewBarPhoto {
            bar_id,
            user_id,
            image_url,
            caption: caption.filter(|text| !text.trim().is_empty()),
        };
        self.photos.create(&photo).await.map_err(map_photo_error)
    }
}

fn map_photo_error(err: PhotoPersistenceError) -> Error {
    match err {
        PhotoPersistenceError::BarNotFound => Error::not_found("Bar not found"),
        PhotoPersistenceError::Connection(cause) => {
            error!(error = %cause, "photo store unavailable");
            Error::service_unavailable("Service temporarily unavailable")
        }
        PhotoPersistenceError::Query(cause) => {
            error!(error = %cause, "photo query failed");
            Error::internal("Internal server error")
        }
    }
}
