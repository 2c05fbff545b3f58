//! Signup, login, logout, and current-user handlers.

use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::auth::{LoginData, SignupData};
use crate::domain::{User, UserId};

use super::error::ApiResult;
use super::session::SessionContext;
use super::state::HttpState;

/// Public view of a user account. Never includes the password hash.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub points: i32,
    pub level: i32,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email.to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            profile_image_url: user.profile_image_url,
            points: user.points,
            level: user.level,
            created_at: user.created_at,
        }
    }
}

/// Register a new account and start a session.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body = SignupData,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation failure"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<SignupData>,
) -> ApiResult<HttpResponse> {
    let user = state.auth.signup(body.into_inner()).await?;
    session.persist(&user)?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Verify credentials and start a session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginData,
    responses(
        (status = 200, description = "Logged in", body = UserResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<LoginData>,
) -> ApiResult<HttpResponse> {
    let user = state.auth.login(body.into_inner()).await?;
    session.persist(&user)?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses((status = 204, description = "Session cleared"))
)]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// The account behind the current session.
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = "auth",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let identity = session.require_identity()?;
    let user = state.auth.current_user(&identity.user_id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// Register the auth routes under `/api/auth`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/signup", web::post().to(signup))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/user", web::get().to(current_user)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::json;

    use crate::inbound::http::test_utils::{api_app, signup_payload};
    use crate::test_support::InMemoryStore;

    #[actix_web::test]
    async fn signup_then_fetch_current_user() {
        let app = test::init_service(api_app(InMemoryStore::shared())).await;

        let created = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/signup")
                .set_json(signup_payload("kai@example.com"))
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let cookie = created
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();
        let body: serde_json::Value = test::read_body_json(created).await;
        assert_eq!(body["email"], "kai@example.com");
        assert_eq!(body["points"], 0);
        assert!(body.get("passwordHash").is_none());

        let me = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/auth/user")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(me.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(me).await;
        assert_eq!(body["email"], "kai@example.com");
    }

    #[actix_web::test]
    async fn duplicate_signup_conflicts() {
        let app = test::init_service(api_app(InMemoryStore::shared())).await;
        for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let res = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/api/auth/signup")
                    .set_json(signup_payload("kai@example.com"))
                    .to_request(),
            )
            .await;
            assert_eq!(res.status(), expected);
        }
    }

    #[actix_web::test]
    async fn login_failures_share_one_message() {
        let app = test::init_service(api_app(InMemoryStore::shared())).await;
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/signup")
                .set_json(signup_payload("kai@example.com"))
                .to_request(),
        )
        .await;

        let mut messages = Vec::new();
        for (email, password) in [
            ("kai@example.com", "wrong-password-123"),
            ("ghost@example.com", "hunter2hunter2"),
        ] {
            let res = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/api/auth/login")
                    .set_json(json!({"email": email, "password": password}))
                    .to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
            let body: serde_json::Value = test::read_body_json(res).await;
            messages.push(body["message"].clone());
        }
        assert_eq!(messages[0], messages[1]);
    }

    #[actix_web::test]
    async fn current_user_requires_a_session() {
        let app = test::init_service(api_app(InMemoryStore::shared())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/auth/user").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn logout_clears_the_session() {
        let app = test::init_service(api_app(InMemoryStore::shared())).await;
        let created = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/signup")
                .set_json(signup_payload("kai@example.com"))
                .to_request(),
        )
        .await;
        let cookie = created
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let out = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/logout")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(out.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn signup_rejects_short_passwords() {
        let app = test::init_service(api_app(InMemoryStore::shared())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/signup")
                .set_json(json!({"email": "kai@example.com", "password": "short"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    // Route registration sanity: unknown method on a known path is rejected.
    #[actix_web::test]
    async fn get_on_signup_is_method_not_allowed() {
        let app = test::init_service(
            App::new().service(web::scope("/api").configure(configure)),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/auth/signup").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
