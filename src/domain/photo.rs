//! Photos attached to bars.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::user::UserId;

/// A photo of a bar. The uploader is optional: the row outlives the
/// uploading account (the database nulls the reference on user deletion).
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BarPhoto {
    pub id: Uuid,
    pub bar_id: Uuid,
    pub user_id: Option<UserId>,
    pub image_url: String,
    pub caption: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields required to attach a photo to a bar.
#[derive(Debug, Clone)]
pub struct NewBarPhoto {
    pub bar_id: Uuid,
    pub user_id: UserId,
    pub image_url: String,
    pub caption: Option<String>,
}
