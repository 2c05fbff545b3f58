//! Persistence port for check-ins and point accrual.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::checkin::{CheckIn, NewCheckIn};
use crate::domain::user::UserId;

/// Errors surfaced by [`CheckInRepository`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum CheckInPersistenceError {
    #[error("failed to acquire database connection: {0}")]
    Connection(String),
    #[error("check-in query failed: {0}")]
    Query(String),
    /// The referenced bar does not exist.
    #[error("bar not found")]
    BarNotFound,
}

impl CheckInPersistenceError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }
}

/// Store of check-ins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckInRepository: Send + Sync {
    /// Insert the check-in and credit its points to the user, atomically.
    /// The user's level is rederived from the new point total.
    async fn record(&self, check_in: &NewCheckIn) -> Result<CheckIn, CheckInPersistenceError>;

    /// Check-ins for a user, newest first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CheckIn>, CheckInPersistenceError>;

    /// Check-ins at a bar, newest first.
    async fn list_for_bar(&self, bar_id: Uuid) -> Result<Vec<CheckIn>, CheckInPersistenceError>;
}
