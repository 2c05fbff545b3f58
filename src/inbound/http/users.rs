//! Per-user history, stats, and achievement handlers.

use actix_web::{web, HttpResponse};

use crate::domain::achievement_service::map_stats_error;
use crate::domain::{Achievement, CheckIn, Favorite, Review, UserAchievement, UserStats};

use super::error::ApiResult;
use super::session::SessionContext;
use super::state::HttpState;

/// Check-ins by the current user, newest first.
#[utoipa::path(
    get,
    path = "/api/user/checkins",
    tag = "users",
    responses(
        (status = 200, description = "Check-in history", body = [CheckIn]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_check_ins(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let check_ins = state.check_ins.for_user(&user_id).await?;
    Ok(HttpResponse::Ok().json(check_ins))
}

/// Bars the current user has favorited.
#[utoipa::path(
    get,
    path = "/api/user/favorites",
    tag = "users",
    responses(
        (status = 200, description = "Favorites", body = [Favorite]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_favorites(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let favorites = state.favorites.for_user(&user_id).await?;
    Ok(HttpResponse::Ok().json(favorites))
}

/// Reviews written by the current user, newest first.
#[utoipa::path(
    get,
    path = "/api/user/reviews",
    tag = "users",
    responses(
        (status = 200, description = "Review history", body = [Review]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_reviews(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let reviews = state.reviews.for_user(&user_id).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

/// Aggregate activity counters for the current user.
#[utoipa::path(
    get,
    path = "/api/user/stats",
    tag = "users",
    responses(
        (status = 200, description = "Activity stats", body = UserStats),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_stats(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let stats = state
        .stats
        .user_stats(&user_id)
        .await
        .map_err(map_stats_error)?;
    Ok(HttpResponse::Ok().json(stats))
}

/// Achievements earned by the current user.
#[utoipa::path(
    get,
    path = "/api/user/achievements",
    tag = "users",
    responses(
        (status = 200, description = "Earned achievements", body = [UserAchievement]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_achievements(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let earned = state.achievements.earned(&user_id).await?;
    Ok(HttpResponse::Ok().json(earned))
}

/// Every active achievement definition, for progress display.
#[utoipa::path(
    get,
    path = "/api/achievements",
    tag = "users",
    responses((status = 200, description = "Achievement catalog", body = [Achievement]))
)]
pub async fn achievement_catalog(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let catalog = state.achievements.catalog().await?;
    Ok(HttpResponse::Ok().json(catalog))
}

/// Register the user routes under `/api/user` plus the achievement catalog.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .route("/checkins", web::get().to(my_check_ins))
            .route("/favorites", web::get().to(my_favorites))
            .route("/reviews", web::get().to(my_reviews))
            .route("/stats", web::get().to(my_stats))
            .route("/achievements", web::get().to(my_achievements)),
    )
    .route("/achievements", web::get().to(achievement_catalog));
}
