//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::{test, web, App};
use serde_json::json;

use crate::domain::achievement_service::AchievementEvaluator;
use crate::domain::auth::AuthService;
use crate::domain::bar_service::BarCatalog;
use crate::domain::checkin_service::CheckInLedger;
use crate::domain::favorite_service::FavoriteService;
use crate::domain::photo_service::PhotoGallery;
use crate::domain::review_service::ReviewService;
use crate::test_support::InMemoryStore;

use super::state::HttpState;
use super::{auth, bars, users};

/// Session middleware with a fresh key per invocation, cookie named
/// `session`, and `Secure` disabled for plain-HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Wire the domain services over a single in-memory store.
pub fn test_state(store: Arc<InMemoryStore>) -> HttpState {
    let evaluator = Arc::new(AchievementEvaluator::new(store.clone(), store.clone()));
    HttpState {
        auth: Arc::new(AuthService::new(store.clone())),
        bars: Arc::new(BarCatalog::new(store.clone())),
        reviews: Arc::new(ReviewService::new(store.clone())),
        check_ins: Arc::new(CheckInLedger::new(store.clone(), evaluator.clone())),
        favorites: Arc::new(FavoriteService::new(store.clone())),
        photos: Arc::new(PhotoGallery::new(store.clone())),
        achievements: evaluator,
        stats: store,
    }
}

/// A full API app over the in-memory store, routed like production.
pub fn api_app(
    store: Arc<InMemoryStore>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(test_state(store)))
        .wrap(test_session_middleware())
        .service(
            web::scope("/api")
                .configure(auth::configure)
                .configure(bars::configure)
                .configure(users::configure),
        )
}

pub fn signup_payload(email: &str) -> serde_json::Value {
    json!({
        "email": email,
        "password": "correct-horse-battery",
        "firstName": "Kai",
    })
}

/// Sign up and return the session cookie for follow-up requests.
pub async fn login_session(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    payload: serde_json::Value,
) -> actix_web::cookie::Cookie<'static> {
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(payload)
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "signup failed: {}", res.status());
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}
