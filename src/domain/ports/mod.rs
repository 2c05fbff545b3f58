//! Outbound ports implemented by infrastructure adapters.
//!
//! Each port is an `async_trait` object the domain services depend on.
//! Under `cfg(test)` every port carries a mockall automock for unit tests.

pub mod achievement_repository;
pub mod bar_repository;
pub mod checkin_repository;
pub mod favorite_repository;
pub mod photo_repository;
pub mod places_source;
pub mod review_repository;
pub mod stats_query;
pub mod user_repository;

pub use self::achievement_repository::{AchievementPersistenceError, AchievementRepository};
pub use self::bar_repository::{BarPersistenceError, BarRepository};
pub use self::checkin_repository::{CheckInPersistenceError, CheckInRepository};
pub use self::favorite_repository::{FavoritePersistenceError, FavoriteRepository};
pub use self::photo_repository::{BarPhotoRepository, PhotoPersistenceError};
pub use self::places_source::{Place, PlaceId, PlaceKind, PlacesSource, PlacesSourceError};
pub use self::review_repository::{ReviewPersistenceError, ReviewRepository};
pub use self::stats_query::{StatsQueryError, UserStatsQuery};
pub use self::user_repository::{UserPersistenceError, UserRepository};

#[cfg(test)]
pub use self::achievement_repository::MockAchievementRepository;
#[cfg(test)]
pub use self::bar_repository::MockBarRepository;
#[cfg(test)]
pub use self::checkin_repository::MockCheckInRepository;
#[cfg(test)]
pub use self::favorite_repository::MockFavoriteRepository;
#[cfg(test)]
pub use self::photo_repository::MockBarPhotoRepository;
#[cfg(test)]
pub use self::places_source::MockPlacesSource;
#[cfg(test)]
pub use self::review_repository::MockReviewRepository;
#[cfg(test)]
pub use self::stats_query::MockUserStatsQuery;
#[cfg(test)]
pub use self::user_repository::MockUserRepository;
