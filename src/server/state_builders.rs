//! Wiring of Diesel-backed adapters into the shared HTTP state.

use std::sync::Arc;

use actix_web::web;

use kavamap::domain::achievement_service::AchievementEvaluator;
use kavamap::domain::auth::AuthService;
use kavamap::domain::bar_service::BarCatalog;
use kavamap::domain::checkin_service::CheckInLedger;
use kavamap::domain::favorite_service::FavoriteService;
use kavamap::domain::photo_service::PhotoGallery;
use kavamap::domain::review_service::ReviewService;
use kavamap::inbound::http::state::HttpState;
use kavamap::outbound::persistence::{
    DieselAchievementRepository, DieselBarPhotoRepository, DieselBarRepository,
    DieselCheckInRepository, DieselFavoriteRepository, DieselReviewRepository,
    DieselUserRepository, DieselUserStatsQuery,
};

use super::config::ServerConfig;

/// Build the HTTP state over database-backed adapters.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let pool = config.pool.clone();
    let stats = Arc::new(DieselUserStatsQuery::new(pool.clone()));
    let evaluator = Arc::new(AchievementEvaluator::new(
        Arc::new(DieselAchievementRepository::new(pool.clone())),
        stats.clone(),
    ));
    web::Data::new(HttpState {
        auth: Arc::new(AuthService::new(Arc::new(DieselUserRepository::new(
            pool.clone(),
        )))),
        bars: Arc::new(BarCatalog::new(Arc::new(DieselBarRepository::new(
            pool.clone(),
        )))),
        reviews: Arc::new(ReviewService::new(Arc::new(DieselReviewRepository::new(
            pool.clone(),
        )))),
        check_ins: Arc::new(
            CheckInLedger::new(
                Arc::new(DieselCheckInRepository::new(pool.clone())),
                evaluator.clone(),
            )
            .with_award(config.check_in_points),
        ),
        favorites: Arc::new(FavoriteService::new(Arc::new(
            DieselFavoriteRepository::new(pool.clone()),
        ))),
        photos: Arc::new(PhotoGallery::new(Arc::new(DieselBarPhotoRepository::new(
            pool,
        )))),
        achievements: evaluator,
        stats,
    })
}
