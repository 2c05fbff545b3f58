//! Aggregate statistics for a user's activity.

use serde::Serialize;
use utoipa::ToSchema;

/// Counts summarising a user's activity across the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    /// Number of distinct bars the user has checked in to.
    pub visited_bars: i64,
    pub total_check_ins: i64,
    pub total_reviews: i64,
    /// Current point balance from the user row.
    pub total_points: i32,
}
