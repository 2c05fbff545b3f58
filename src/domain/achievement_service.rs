//! Achievement evaluation after point-earning activity.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{error, info};

use crate::domain::achievement::UserAchievement;
use crate::domain::error::Error;
use crate::domain::ports::{
    AchievementPersistenceError, AchievementRepository, StatsQueryError, UserStatsQuery,
};
use crate::domain::user::UserId;

/// Re-evaluates a user's achievements against their current statistics.
///
/// Evaluation is idempotent: achievements already held are skipped, so
/// running it twice over the same state grants nothing new.
pub struct AchievementEvaluator {
    achievements: Arc<dyn AchievementRepository>,
    stats: Arc<dyn UserStatsQuery>,
}

impl AchievementEvaluator {
    pub fn new(
        achievements: Arc<dyn AchievementRepository>,
        stats: Arc<dyn UserStatsQuery>,
    ) -> Self {
        Self {
            achievements,
            stats,
        }
    }

    /// Grant every achievement whose thresholds the user now satisfies.
    /// Returns the newly granted achievements only.
    pub async fn evaluate(&self, user_id: &UserId) -> Result<Vec<UserAchievement>, Error> {
        let stats = self
            .stats
            .user_stats(user_id)
            .await
            .map_err(map_stats_error)?;
        let held: HashSet<_> = self
            .achievements
            .list_for_user(user_id)
            .await
            .map_err(map_achievement_error)?
            .into_iter()
            .map(|grant| grant.achievement_id)
            .collect();

        let mut granted = Vec::new();
        for achievement in self
            .achievements
            .list_active()
            .await
            .map_err(map_achievement_error)?
        {
            if held.contains(&achievement.id) || !achievement.unlocked_by(&stats) {
                continue;
            }
            let grant = self
                .achievements
                .grant(user_id, achievement.id)
                .await
                .map_err(map_achievement_error)?;
            info!(user_id = %user_id, achievement = %achievement.name, "achievement unlocked");
            granted.push(grant);
        }
        Ok(granted)
    }

    /// Grants the user currently holds, newest first.
    pub async fn earned(&self, user_id: &UserId) -> Result<Vec<UserAchievement>, Error> {
        self.achievements
            .list_for_user(user_id)
            .await
            .map_err(map_achievement_error)
    }

    /// Every active achievement definition.
    pub async fn catalog(&self) -> Result<Vec<crate::domain::achievement::Achievement>, Error> {
        self.achievements
            .list_active()
            .await
            .map_err(map_achievement_error)
    }
}

fn map_achievement_error(err: AchievementPersistenceError) -> Error {
    match err {
        AchievementPersistenceError::Connection(cause) => {
            error!(error = %cause, "achievement store unavailable");
            Error::service_unavailable("Service temporarily unavailable")
        }
        AchievementPersistenceError::Query(cause) => {
            error!(error = %cause, "achievement query failed");
            Error::internal("Internal server error")
        }
    }
}

pub(crate) fn map_stats_error(err: StatsQueryError) -> Error {
    match err {
        StatsQueryError::UserNotFound => Error::not_found("User not found"),
        StatsQueryError::Connection(cause) => {
            error!(error = %cause, "statistics store unavailable");
            Error::service_unavailable("Service temporarily unavailable")
        }
        StatsQueryError::Query(cause) => {
            error!(error = %cause, "statistics query failed");
            Error::internal("Internal server error")
        }
    }
}
