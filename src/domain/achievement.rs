//! Achievement definitions and per-user grants.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::stats::UserStats;
use crate::domain::user::UserId;

/// A grantable achievement with its unlock thresholds.
///
/// Both thresholds must be met for the achievement to unlock.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub points_required: i32,
    /// Distinct bars the user must have checked in to.
    pub bars_required: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Achievement {
    /// True when the user's statistics satisfy every threshold.
    pub fn unlocked_by(&self, stats: &UserStats) -> bool {
        stats.total_points >= self.points_required
            && stats.visited_bars >= i64::from(self.bars_required)
    }
}

/// A grant of an achievement to a user.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserAchievement {
    pub id: Uuid,
    pub user_id: UserId,
    pub achievement_id: Uuid,
    pub earned_at: DateTime<Utc>,
}
