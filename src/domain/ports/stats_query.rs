//! Read-only port for aggregate user statistics.

use async_trait::async_trait;

use crate::domain::stats::UserStats;
use crate::domain::user::UserId;

/// Errors surfaced by [`UserStatsQuery`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum StatsQueryError {
    #[error("failed to acquire database connection: {0}")]
    Connection(String),
    #[error("statistics query failed: {0}")]
    Query(String),
    /// No user row exists for the identifier.
    #[error("user not found")]
    UserNotFound,
}

impl StatsQueryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }
}

/// Aggregated activity counts for a user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStatsQuery: Send + Sync {
    async fn user_stats(&self, user_id: &UserId) -> Result<UserStats, StatsQueryError>;
}
