//! Check-in records and point awards.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::user::UserId;

/// Points awarded for each check-in unless configured otherwise.
pub const DEFAULT_CHECK_IN_POINTS: i32 = 10;

/// A recorded visit to a bar.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub id: Uuid,
    pub bar_id: Uuid,
    pub user_id: UserId,
    pub note: Option<String>,
    pub photo_url: Option<String>,
    /// Points granted for this visit, captured at insert time.
    pub points: i32,
    pub created_at: DateTime<Utc>,
}

/// Fields required to record a check-in.
#[derive(Debug, Clone)]
pub struct NewCheckIn {
    pub bar_id: Uuid,
    pub user_id: UserId,
    pub note: Option<String>,
    pub photo_url: Option<String>,
    pub points: i32,
}
