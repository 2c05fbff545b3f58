//! Persistence port for achievements and grants.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::achievement::{Achievement, UserAchievement};
use crate::domain::user::UserId;

/// Errors surfaced by [`AchievementRepository`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum AchievementPersistenceError {
    #[error("failed to acquire database connection: {0}")]
    Connection(String),
    #[error("achievement query failed: {0}")]
    Query(String),
}

impl AchievementPersistenceError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }
}

/// Store of achievement definitions and per-user grants.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AchievementRepository: Send + Sync {
    /// Every defined achievement, lowest points threshold first.
    async fn list_active(&self) -> Result<Vec<Achievement>, AchievementPersistenceError>;

    /// Grants already held by a user.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<UserAchievement>, AchievementPersistenceError>;

    /// Record a grant.
    async fn grant(
        &self,
        user_id: &UserId,
        achievement_id: Uuid,
    ) -> Result<UserAchievement, AchievementPersistenceError>;
}
