//! Domain entities, value types, services, and ports.
//!
//! Types here are framework-free. Inbound adapters translate HTTP requests
//! into calls on the services; outbound adapters implement the port traits
//! against real infrastructure.

pub mod achievement;
pub mod achievement_service;
pub mod auth;
pub mod bar;
pub mod bar_service;
pub mod checkin;
pub mod checkin_service;
pub mod credentials;
pub mod error;
pub mod favorite;
pub mod favorite_service;
pub mod photo;
pub mod photo_service;
pub mod places;
pub mod ports;
pub mod review;
pub mod review_service;
pub mod slug;
pub mod stats;
pub mod user;

pub use self::achievement::{Achievement, UserAchievement};
pub use self::achievement_service::AchievementEvaluator;
pub use self::auth::{AuthService, LoginData, SignupData};
pub use self::bar::{Bar, BarUpdate, Coordinates, NewBar};
pub use self::bar_service::BarCatalog;
pub use self::checkin::{CheckIn, NewCheckIn, DEFAULT_CHECK_IN_POINTS};
pub use self::checkin_service::{CheckInLedger, CheckInOutcome};
pub use self::error::{Error, ErrorCode};
pub use self::favorite::Favorite;
pub use self::favorite_service::FavoriteService;
pub use self::photo::BarPhoto;
pub use self::photo_service::PhotoGallery;
pub use self::review::{NewReview, Rating, Review};
pub use self::review_service::ReviewService;
pub use self::stats::UserStats;
pub use self::user::{Email, User, UserId};

/// Convenient result alias for domain operations surfaced to adapters.
pub type ApiResult<T> = Result<T, Error>;
