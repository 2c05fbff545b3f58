//! Signup and login flows.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::credentials::{hash_password, verify_password, CredentialsError};
use crate::domain::error::Error;
use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::user::{Email, NewUser, User, UserId};

/// Message returned for any login failure. Deliberately generic so the
/// response does not reveal whether the account exists.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Signup request payload.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupData {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginData {
    pub email: String,
    pub password: String,
}

/// Account registration and credential verification.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Register a new account.
    pub async fn signup(&self, data: SignupData) -> Result<User, Error> {
        let email = Email::new(data.email).map_err(|err| {
            Error::invalid_request(err.to_string())
        })?;
        let password_hash = hash_password(&data.password).map_err(|err| match err {
            CredentialsError::PasswordTooShort => Error::invalid_request(err.to_string()),
            CredentialsError::Hash(cause) => {
                error!(error = %cause, "password hashing failed");
                Error::internal("Failed to create user")
            }
        })?;
        let new_user = NewUser {
            email,
            password_hash,
            first_name: data.first_name,
            last_name: data.last_name,
        };
        self.users.create(&new_user).await.map_err(|err| match err {
            UserPersistenceError::DuplicateEmail => Error::conflict("User already exists"),
            other => map_user_error(other, "signup"),
        })
    }

    /// Verify credentials and return the account on success.
    ///
    /// Every failure path returns the same generic 401 message.
    pub async fn login(&self, data: LoginData) -> Result<User, Error> {
        let Ok(email) = Email::new(data.email) else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let user = self
            .users
            .find_by_email(&email)
            .await
            .map_err(|err| map_user_error(err, "login"))?;
        match user {
            Some(user) if verify_password(&data.password, &user.password_hash) => Ok(user),
            Some(_) | None => {
                warn!(email = %email, "rejected login attempt");
                Err(Error::unauthorized(INVALID_CREDENTIALS))
            }
        }
    }

    /// Resolve the account behind an authenticated session.
    pub async fn current_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(|err| map_user_error(err, "current_user"))?
            .ok_or_else(|| Error::unauthorized("Unauthorized"))
    }
}

fn map_user_error(err: UserPersistenceError, operation: &str) -> Error {
    match err {
        UserPersistenceError::Connection(cause) => {
            error!(operation, error = %cause, "user store unavailable");
            Error::service_unavailable("Service temporarily unavailable")
        }
        UserPersistenceError::Query(cause) => {
            error!(operation, error = %cause, "user query failed");
            Error::internal("Internal server error")
        }
        UserPersistenceError::DuplicateEmail => Error::conflict("User already exists"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::credentials::PasswordHash;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::MockUserRepository;
    use chrono::Utc;

    fn stored_user(email: &str, password: &str) -> User {
        User {
            id: UserId::random(),
            email: Email::new(email).expect("valid email"),
            password_hash: PasswordHash::from_stored(
                bcrypt::hash(password, 4).expect("hash"),
            ),
            first_name: None,
            last_name: None,
            profile_image_url: None,
            points: 0,
            level: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn signup_data(email: &str) -> SignupData {
        SignupData {
            email: email.into(),
            password: "hunter2hunter2".into(),
            first_name: Some("Kai".into()),
            last_name: None,
        }
    }

    #[tokio::test]
    async fn signup_creates_account() {
        let mut users = MockUserRepository::new();
        users.expect_create().returning(|new_user| {
            Ok(User {
                id: UserId::random(),
                email: new_user.email.clone(),
                password_hash: new_user.password_hash.clone(),
                first_name: new_user.first_name.clone(),
                last_name: new_user.last_name.clone(),
                profile_image_url: None,
                points: 0,
                level: 1,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        });
        let service = AuthService::new(Arc::new(users));
        let user = service
            .signup(signup_data("kai@example.com"))
            .await
            .expect("signup succeeds");
        assert_eq!(user.email.as_ref(), "kai@example.com");
        assert_eq!(user.points, 0);
    }

    #[tokio::test]
    async fn duplicate_signup_is_a_conflict() {
        let mut users = MockUserRepository::new();
        users
            .expect_create()
            .returning(|_| Err(UserPersistenceError::DuplicateEmail));
        let service = AuthService::new(Arc::new(users));
        let err = service
            .signup(signup_data("kai@example.com"))
            .await
            .expect_err("duplicate rejected");
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn signup_rejects_short_password() {
        let service = AuthService::new(Arc::new(MockUserRepository::new()));
        let err = service
            .signup(SignupData {
                password: "short".into(),
                ..signup_data("kai@example.com")
            })
            .await
            .expect_err("short password rejected");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn login_accepts_correct_password() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user("kai@example.com", "hunter2hunter2"))));
        let service = AuthService::new(Arc::new(users));
        let user = service
            .login(LoginData {
                email: "kai@example.com".into(),
                password: "hunter2hunter2".into(),
            })
            .await
            .expect("login succeeds");
        assert_eq!(user.email.as_ref(), "kai@example.com");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_account_look_identical() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|email| {
                if email.as_ref() == "kai@example.com" {
                    Ok(Some(stored_user("kai@example.com", "hunter2hunter2")))
                } else {
                    Ok(None)
                }
            });
        let service = AuthService::new(Arc::new(users));

        let wrong_password = service
            .login(LoginData {
                email: "kai@example.com".into(),
                password: "not-the-password".into(),
            })
            .await
            .expect_err("wrong password rejected");
        let unknown_account = service
            .login(LoginData {
                email: "nobody@example.com".into(),
                password: "hunter2hunter2".into(),
            })
            .await
            .expect_err("unknown account rejected");

        assert_eq!(wrong_password.code, ErrorCode::Unauthorized);
        assert_eq!(wrong_password.message, unknown_account.message);
    }

    #[tokio::test]
    async fn store_outage_maps_to_service_unavailable() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Err(UserPersistenceError::connection("pool exhausted")));
        let service = AuthService::new(Arc::new(users));
        let err = service
            .login(LoginData {
                email: "kai@example.com".into(),
                password: "hunter2hunter2".into(),
            })
            .await
            .expect_err("outage surfaces");
        assert_eq!(err.code, ErrorCode::ServiceUnavailable);
    }
}
