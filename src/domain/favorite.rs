//! Favorite bars saved by users.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::user::UserId;

/// A user's saved bar. At most one row exists per (user, bar) pair.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: Uuid,
    pub bar_id: Uuid,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}
