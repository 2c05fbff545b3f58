//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use crate::domain::achievement_service::AchievementEvaluator;
use crate::domain::auth::AuthService;
use crate::domain::bar_service::BarCatalog;
use crate::domain::checkin_service::CheckInLedger;
use crate::domain::favorite_service::FavoriteService;
use crate::domain::photo_service::PhotoGallery;
use crate::domain::ports::UserStatsQuery;
use crate::domain::review_service::ReviewService;

/// Domain services shared by every HTTP handler.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<AuthService>,
    pub bars: Arc<BarCatalog>,
    pub reviews: Arc<ReviewService>,
    pub check_ins: Arc<CheckInLedger>,
    pub favorites: Arc<FavoriteService>,
    pub photos: Arc<PhotoGallery>,
    pub achievements: Arc<AchievementEvaluator>,
    pub stats: Arc<dyn UserStatsQuery>,
}
