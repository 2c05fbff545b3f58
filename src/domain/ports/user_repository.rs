//! Persistence port for user accounts.

use async_trait::async_trait;

use crate::domain::user::{Email, NewUser, User, UserId};

/// Errors surfaced by [`UserRepository`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum UserPersistenceError {
    /// A connection could not be obtained from the pool.
    #[error("failed to acquire database connection: {0}")]
    Connection(String),
    /// A query failed at the database.
    #[error("user query failed: {0}")]
    Query(String),
    /// Insert violated the unique email constraint.
    #[error("a user with this email already exists")]
    DuplicateEmail,
}

impl UserPersistenceError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }
}

/// Store of registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with [`UserPersistenceError::DuplicateEmail`]
    /// when the email is already registered.
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Look up a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Look up a user by email address.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;
}
