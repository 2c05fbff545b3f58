//! PostgreSQL persistence adapters built on Diesel and `diesel-async`.

pub mod diesel_achievement_repository;
pub mod diesel_bar_repository;
pub mod diesel_checkin_repository;
pub mod diesel_favorite_repository;
pub mod diesel_photo_repository;
pub mod diesel_review_repository;
pub mod diesel_stats_query;
pub mod diesel_user_repository;
pub mod error_map;
pub mod models;
pub mod pool;
pub mod schema;

pub use self::diesel_achievement_repository::DieselAchievementRepository;
pub use self::diesel_bar_repository::DieselBarRepository;
pub use self::diesel_checkin_repository::DieselCheckInRepository;
pub use self::diesel_favorite_repository::DieselFavoriteRepository;
pub use self::diesel_photo_repository::DieselBarPhotoRepository;
pub use self::diesel_review_repository::DieselReviewRepository;
pub use self::diesel_stats_query::DieselUserStatsQuery;
pub use self::diesel_user_repository::DieselUserRepository;
pub use self::pool::{DbPool, PoolConfig, PoolError};
