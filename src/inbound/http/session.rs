//! Session wrapper keeping handlers free of raw cookie plumbing.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Email, Error, User, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const EMAIL_KEY: &str = "email";

/// The authenticated identity carried by a session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub email: Email,
}

/// Thin wrapper over the Actix session exposing identity operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's identity in the session cookie.
    pub fn persist(&self, user: &User) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user.id.to_string())
            .and_then(|()| self.0.insert(EMAIL_KEY, user.email.to_string()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Drop the session entirely, invalidating the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// Fetch the identity from the session, if present and well formed.
    pub fn identity(&self) -> Result<Option<Identity>, Error> {
        let raw_id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        let raw_email = self
            .0
            .get::<String>(EMAIL_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        let (Some(raw_id), Some(raw_email)) = (raw_id, raw_email) else {
            return Ok(None);
        };
        match (UserId::parse(&raw_id), Email::new(raw_email)) {
            (Ok(user_id), Ok(email)) => Ok(Some(Identity { user_id, email })),
            (id, email) => {
                warn!(
                    id_ok = id.is_ok(),
                    email_ok = email.is_ok(),
                    "discarding malformed session identity"
                );
                Ok(None)
            }
        }
    }

    /// Require an authenticated identity or fail with 401.
    pub fn require_identity(&self) -> Result<Identity, Error> {
        self.identity()?
            .ok_or_else(|| Error::unauthorized("Unauthorized"))
    }

    /// Require an authenticated user id or fail with 401.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        Ok(self.require_identity()?.user_id)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};
    use chrono::Utc;

    use crate::domain::credentials::PasswordHash;
    use crate::inbound::http::test_utils::test_session_middleware;

    fn fixture_user() -> User {
        User {
            id: UserId::random(),
            email: Email::new("kai@example.com").expect("valid email"),
            password_hash: PasswordHash::from_stored("$2b$12$fixture"),
            first_name: None,
            last_name: None,
            profile_image_url: None,
            points: 0,
            level: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[actix_web::test]
    async fn round_trips_identity() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/login",
                    web::get().to(|session: SessionContext| async move {
                        session.persist(&fixture_user())?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/whoami",
                    web::get().to(|session: SessionContext| async move {
                        let identity = session.require_identity()?;
                        Ok::<_, Error>(HttpResponse::Ok().body(identity.email.to_string()))
                    }),
                ),
        )
        .await;

        let login =
            test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
        assert_eq!(login.status(), StatusCode::OK);
        let cookie = login
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set");

        let whoami = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(whoami.status(), StatusCode::OK);
        assert_eq!(test::read_body(whoami).await, "kai@example.com");
    }

    #[actix_web::test]
    async fn missing_identity_is_unauthorized() {
        let app = test::init_service(App::new().wrap(test_session_middleware()).route(
            "/whoami",
            web::get().to(|session: SessionContext| async move {
                let _ = session.require_identity()?;
                Ok::<_, Error>(HttpResponse::Ok())
            }),
        ))
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn tampered_identity_is_unauthorized() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/tamper",
                    web::get().to(|session: Session| async move {
                        session.insert(USER_ID_KEY, "not-a-uuid").expect("insert");
                        session
                            .insert(EMAIL_KEY, "kai@example.com")
                            .expect("insert");
                        HttpResponse::Ok()
                    }),
                )
                .route(
                    "/whoami",
                    web::get().to(|session: SessionContext| async move {
                        let _ = session.require_identity()?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                ),
        )
        .await;

        let tamper =
            test::call_service(&app, test::TestRequest::get().uri("/tamper").to_request()).await;
        let cookie = tamper
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
