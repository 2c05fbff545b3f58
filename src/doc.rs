//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API. It
//! registers every HTTP endpoint from the inbound layer, the domain schemas
//! they exchange, and the session cookie security scheme. The generated
//! specification backs Swagger UI, which is mounted at `/docs` in debug
//! builds only.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Achievement, Bar, BarPhoto, BarUpdate, CheckIn, Error, ErrorCode, Favorite, LoginData, NewBar,
    Review, SignupData, UserAchievement, UserStats,
};
use crate::inbound::http::auth::UserResponse;
use crate::inbound::http::bars::{
    CheckInBody, CheckInCreated, FavoriteToggled, PhotoBody, ReviewBody, ReviewCreated,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/auth/login or /api/auth/signup.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Kavamap backend API",
        description = "Kava bar discovery, reviews, check-ins, and achievements.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_user,
        crate::inbound::http::bars::list_bars,
        crate::inbound::http::bars::get_bar,
        crate::inbound::http::bars::create_bar,
        crate::inbound::http::bars::update_bar,
        crate::inbound::http::bars::list_reviews,
        crate::inbound::http::bars::create_review,
        crate::inbound::http::bars::check_in,
        crate::inbound::http::bars::toggle_favorite,
        crate::inbound::http::bars::list_photos,
        crate::inbound::http::bars::add_photo,
        crate::inbound::http::users::my_check_ins,
        crate::inbound::http::users::my_favorites,
        crate::inbound::http::users::my_reviews,
        crate::inbound::http::users::my_stats,
        crate::inbound::http::users::my_achievements,
        crate::inbound::http::users::achievement_catalog,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        SignupData,
        LoginData,
        UserResponse,
        Bar,
        NewBar,
        BarUpdate,
        Review,
        ReviewBody,
        ReviewCreated,
        CheckIn,
        CheckInBody,
        CheckInCreated,
        Favorite,
        FavoriteToggled,
        BarPhoto,
        PhotoBody,
        Achievement,
        UserAchievement,
        UserStats,
    )),
    tags(
        (name = "auth", description = "Account registration and sessions"),
        (name = "bars", description = "The kava bar catalog"),
        (name = "reviews", description = "Bar reviews and rating aggregates"),
        (name = "check-ins", description = "Check-ins and point accrual"),
        (name = "favorites", description = "Saved bars"),
        (name = "photos", description = "Bar photo galleries"),
        (name = "users", description = "Per-user history and achievements"),
        (name = "health", description = "Health probes")
    )
)]
pub struct ApiDoc;
