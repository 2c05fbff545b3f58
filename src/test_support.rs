//! A single in-memory store implementing every persistence port, used by
//! handler tests to exercise the full HTTP stack without a database.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::achievement::{Achievement, UserAchievement};
use crate::domain::bar::{Bar, BarUpdate, Coordinates, NewBar};
use crate::domain::checkin::{CheckIn, NewCheckIn};
use crate::domain::favorite::Favorite;
use crate::domain::photo::{BarPhoto, NewBarPhoto};
use crate::domain::ports::{
    AchievementPersistenceError, AchievementRepository, BarPersistenceError, BarPhotoRepository,
    BarRepository, CheckInPersistenceError, CheckInRepository, FavoritePersistenceError,
    FavoriteRepository, PhotoPersistenceError, ReviewPersistenceError, ReviewRepository,
    StatsQueryError, UserPersistenceError, UserRepository, UserStatsQuery,
};
use crate::domain::review::{NewReview, RatingSummary, Review};
use crate::domain::slug::slugify;
use crate::domain::stats::UserStats;
use crate::domain::user::{level_for_points, Email, NewUser, User, UserId};

#[derive(Default)]
struct StoreState {
    users: Vec<User>,
    bars: Vec<Bar>,
    reviews: Vec<Review>,
    check_ins: Vec<CheckIn>,
    favorites: Vec<Favorite>,
    photos: Vec<BarPhoto>,
    achievements: Vec<Achievement>,
    grants: Vec<UserAchievement>,
}

/// All repositories over one mutex-guarded state, so cross-aggregate
/// effects (points accrual, rating refresh) behave like the database.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed_achievement(&self, name: &str, points_required: i32, bars_required: i32) {
        self.lock().achievements.push(Achievement {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            icon: None,
            points_required,
            bars_required,
            is_active: true,
            created_at: Utc::now(),
        });
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().expect("store mutex poisoned")
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self.lock();
        if state.users.iter().any(|row| row.email == user.email) {
            return Err(UserPersistenceError::DuplicateEmail);
        }
        let now = Utc::now();
        let created = User {
            id: UserId::random(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            profile_image_url: None,
            points: 0,
            level: 1,
            created_at: now,
            updated_at: now,
        };
        state.users.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock().users.iter().find(|row| row.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|row| row.email == *email)
            .cloned())
    }
}

fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;
    let d_lat = (b.latitude() - a.latitude()).to_radians();
    let d_lng = (b.longitude() - a.longitude()).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude().to_radians().cos()
            * b.latitude().to_radians().cos()
            * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[async_trait]
impl BarRepository for InMemoryStore {
    async fn list(&self, limit: i64) -> Result<Vec<Bar>, BarPersistenceError> {
        let mut bars = self.lock().bars.clone();
        bars.sort_by(|a, b| {
            b.average_rating
                .cmp(&a.average_rating)
                .then(b.review_count.cmp(&a.review_count))
        });
        bars.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(bars)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bar>, BarPersistenceError> {
        Ok(self.lock().bars.iter().find(|bar| bar.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Bar>, BarPersistenceError> {
        Ok(self.lock().bars.iter().find(|bar| bar.slug == slug).cloned())
    }

    async fn nearby(
        &self,
        center: Coordinates,
        radius_km: f64,
    ) -> Result<Vec<Bar>, BarPersistenceError> {
        let mut bars: Vec<(f64, Bar)> = self
            .lock()
            .bars
            .iter()
            .filter_map(|bar| {
                let at = Coordinates::new(bar.latitude, bar.longitude).ok()?;
                let distance = haversine_km(center, at);
                (distance <= radius_km).then(|| (distance, bar.clone()))
            })
            .collect();
        bars.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(bars.into_iter().map(|(_, bar)| bar).collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<Bar>, BarPersistenceError> {
        let needle = query.to_lowercase();
        Ok(self
            .lock()
            .bars
            .iter()
            .filter(|bar| {
                bar.name.to_lowercase().contains(&needle)
                    || bar
                        .description
                        .as_deref()
                        .is_some_and(|text| text.to_lowercase().contains(&needle))
                    || bar.city.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn create(&self, bar: &NewBar) -> Result<Bar, BarPersistenceError> {
        let mut state = self.lock();
        let slug = slugify(&bar.name);
        if state.bars.iter().any(|row| row.slug == slug) {
            return Err(BarPersistenceError::DuplicateSlug);
        }
        let now = Utc::now();
        let created = Bar {
            id: Uuid::new_v4(),
            name: bar.name.clone(),
            slug,
            description: bar.description.clone(),
            address: bar.address.clone(),
            city: bar.city.clone(),
            state: bar.state.clone(),
            zip_code: bar.zip_code.clone(),
            latitude: bar.latitude,
            longitude: bar.longitude,
            phone: bar.phone.clone(),
            website: bar.website.clone(),
            image_url: bar.image_url.clone(),
            hours: bar.hours.clone(),
            amenities: bar.amenities.clone(),
            offers_kava: bar.offers_kava,
            offers_kratom: bar.offers_kratom,
            vibe: bar.vibe.clone(),
            is_verified: false,
            average_rating: BigDecimal::from(0),
            review_count: 0,
            created_at: now,
            updated_at: now,
        };
        state.bars.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: Uuid,
        update: &BarUpdate,
    ) -> Result<Option<Bar>, BarPersistenceError> {
        let mut state = self.lock();
        let Some(bar) = state.bars.iter_mut().find(|bar| bar.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &update.name {
            bar.name = name.clone();
        }
        if let Some(description) = &update.description {
            bar.description = Some(description.clone());
        }
        if let Some(address) = &update.address {
            bar.address = address.clone();
        }
        if let Some(city) = &update.city {
            bar.city = city.clone();
        }
        if let Some(us_state) = &update.state {
            bar.state = us_state.clone();
        }
        if let Some(zip_code) = &update.zip_code {
            bar.zip_code = Some(zip_code.clone());
        }
        if let Some(latitude) = update.latitude {
            bar.latitude = latitude;
        }
        if let Some(longitude) = update.longitude {
            bar.longitude = longitude;
        }
        if let Some(phone) = &update.phone {
            bar.phone = Some(phone.clone());
        }
        if let Some(website) = &update.website {
            bar.website = Some(website.clone());
        }
        if let Some(image_url) = &update.image_url {
            bar.image_url = Some(image_url.clone());
        }
        if let Some(hours) = &update.hours {
            bar.hours = Some(hours.clone());
        }
        if let Some(amenities) = &update.amenities {
            bar.amenities = amenities.clone();
        }
        if let Some(offers_kava) = update.offers_kava {
            bar.offers_kava = offers_kava;
        }
        if let Some(offers_kratom) = update.offers_kratom {
            bar.offers_kratom = offers_kratom;
        }
        if let Some(vibe) = &update.vibe {
            bar.vibe = Some(vibe.clone());
        }
        if let Some(is_verified) = update.is_verified {
            bar.is_verified = is_verified;
        }
        bar.updated_at = Utc::now();
        Ok(Some(bar.clone()))
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn list_for_bar(&self, bar_id: Uuid) -> Result<Vec<Review>, ReviewPersistenceError> {
        let mut reviews: Vec<Review> = self
            .lock()
            .reviews
            .iter()
            .filter(|review| review.bar_id == bar_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Review>, ReviewPersistenceError> {
        let mut reviews: Vec<Review> = self
            .lock()
            .reviews
            .iter()
            .filter(|review| review.user_id == *user_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    async fn create_and_refresh(
        &self,
        review: &NewReview,
    ) -> Result<(Review, RatingSummary), ReviewPersistenceError> {
        let mut state = self.lock();
        if !state.bars.iter().any(|bar| bar.id == review.bar_id) {
            return Err(ReviewPersistenceError::BarNotFound);
        }
        let created = Review {
            id: Uuid::new_v4(),
            bar_id: review.bar_id,
            user_id: review.user_id,
            rating: review.rating,
            comment: review.comment.clone(),
            photo_url: review.photo_url.clone(),
            is_verified: false,
            created_at: Utc::now(),
        };
        state.reviews.push(created.clone());

        let ratings: Vec<i32> = state
            .reviews
            .iter()
            .filter(|row| row.bar_id == review.bar_id)
            .map(|row| row.rating.value())
            .collect();
        let count = i32::try_from(ratings.len()).expect("review count fits in i32");
        let sum: i32 = ratings.iter().sum();
        let average = (BigDecimal::from(sum) / BigDecimal::from(count)).with_scale(2);
        let summary = RatingSummary {
            average_rating: average.clone(),
            review_count: count,
        };
        let bar = state
            .bars
            .iter_mut()
            .find(|bar| bar.id == review.bar_id)
            .expect("bar checked above");
        bar.average_rating = average;
        bar.review_count = count;
        bar.updated_at = Utc::now();
        Ok((created, summary))
    }
}

#[async_trait]
impl CheckInRepository for InMemoryStore {
    async fn record(&self, check_in: &NewCheckIn) -> Result<CheckIn, CheckInPersistenceError> {
        let mut state = self.lock();
        if !state.bars.iter().any(|bar| bar.id == check_in.bar_id) {
            return Err(CheckInPersistenceError::BarNotFound);
        }
        let created = CheckIn {
            id: Uuid::new_v4(),
            bar_id: check_in.bar_id,
            user_id: check_in.user_id,
            note: check_in.note.clone(),
            photo_url: check_in.photo_url.clone(),
            points: check_in.points,
            created_at: Utc::now(),
        };
        state.check_ins.push(created.clone());
        let user = state
            .users
            .iter_mut()
            .find(|user| user.id == check_in.user_id)
            .ok_or_else(|| CheckInPersistenceError::query("user row missing"))?;
        user.points += check_in.points;
        user.level = level_for_points(user.points);
        user.updated_at = Utc::now();
        Ok(created)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CheckIn>, CheckInPersistenceError> {
        let mut check_ins: Vec<CheckIn> = self
            .lock()
            .check_ins
            .iter()
            .filter(|row| row.user_id == *user_id)
            .cloned()
            .collect();
        check_ins.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(check_ins)
    }

    async fn list_for_bar(&self, bar_id: Uuid) -> Result<Vec<CheckIn>, CheckInPersistenceError> {
        let mut check_ins: Vec<CheckIn> = self
            .lock()
            .check_ins
            .iter()
            .filter(|row| row.bar_id == bar_id)
            .cloned()
            .collect();
        check_ins.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(check_ins)
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryStore {
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Favorite>, FavoritePersistenceError> {
        let mut favorites: Vec<Favorite> = self
            .lock()
            .favorites
            .iter()
            .filter(|row| row.user_id == *user_id)
            .cloned()
            .collect();
        favorites.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(favorites)
    }

    async fn contains(
        &self,
        user_id: &UserId,
        bar_id: Uuid,
    ) -> Result<bool, FavoritePersistenceError> {
        Ok(self
            .lock()
            .favorites
            .iter()
            .any(|row| row.user_id == *user_id && row.bar_id == bar_id))
    }

    async fn insert(
        &self,
        user_id: &UserId,
        bar_id: Uuid,
    ) -> Result<Favorite, FavoritePersistenceError> {
        let created = Favorite {
            id: Uuid::new_v4(),
            bar_id,
            user_id: *user_id,
            created_at: Utc::now(),
        };
        self.lock().favorites.push(created.clone());
        Ok(created)
    }

    async fn remove(
        &self,
        user_id: &UserId,
        bar_id: Uuid,
    ) -> Result<(), FavoritePersistenceError> {
        self.lock()
            .favorites
            .retain(|row| !(row.user_id == *user_id && row.bar_id == bar_id));
        Ok(())
    }
}

#[async_trait]
impl BarPhotoRepository for InMemoryStore {
    async fn list_for_bar(&self, bar_id: Uuid) -> Result<Vec<BarPhoto>, PhotoPersistenceError> {
        let mut photos: Vec<BarPhoto> = self
            .lock()
            .photos
            .iter()
            .filter(|row| row.bar_id == bar_id)
            .cloned()
            .collect();
        photos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(photos)
    }

    async fn create(&self, photo: &NewBarPhoto) -> Result<BarPhoto, PhotoPersistenceError> {
        let mut state = self.lock();
        if !state.bars.iter().any(|bar| bar.id == photo.bar_id) {
            return Err(PhotoPersistenceError::BarNotFound);
        }
        let created = BarPhoto {
            id: Uuid::new_v4(),
            bar_id: photo.bar_id,
            user_id: Some(photo.user_id),
            image_url: photo.image_url.clone(),
            caption: photo.caption.clone(),
            is_verified: false,
            created_at: Utc::now(),
        };
        state.photos.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl AchievementRepository for InMemoryStore {
    async fn list_active(&self) -> Result<Vec<Achievement>, AchievementPersistenceError> {
        let mut achievements: Vec<Achievement> = self
            .lock()
            .achievements
            .iter()
            .filter(|row| row.is_active)
            .cloned()
            .collect();
        achievements.sort_by_key(|row| row.points_required);
        Ok(achievements)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<UserAchievement>, AchievementPersistenceError> {
        Ok(self
            .lock()
            .grants
            .iter()
            .filter(|row| row.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn grant(
        &self,
        user_id: &UserId,
        achievement_id: Uuid,
    ) -> Result<UserAchievement, AchievementPersistenceError> {
        let created = UserAchievement {
            id: Uuid::new_v4(),
            user_id: *user_id,
            achievement_id,
            earned_at: Utc::now(),
        };
        self.lock().grants.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl UserStatsQuery for InMemoryStore {
    async fn user_stats(&self, user_id: &UserId) -> Result<UserStats, StatsQueryError> {
        let state = self.lock();
        let points = state
            .users
            .iter()
            .find(|user| user.id == *user_id)
            .map(|user| user.points)
            .ok_or(StatsQueryError::UserNotFound)?;
        let mut visited: Vec<Uuid> = state
            .check_ins
            .iter()
            .filter(|row| row.user_id == *user_id)
            .map(|row| row.bar_id)
            .collect();
        let total_check_ins = visited.len() as i64;
        visited.sort_unstable();
        visited.dedup();
        let total_reviews = state
            .reviews
            .iter()
            .filter(|row| row.user_id == *user_id)
            .count() as i64;
        Ok(UserStats {
            visited_bars: visited.len() as i64,
            total_check_ins,
            total_reviews,
            total_points: points,
        })
    }
}
