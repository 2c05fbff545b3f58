//! Row types bridging Diesel and the domain entities.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::achievement::{Achievement, UserAchievement};
use crate::domain::bar::{Bar, BarUpdate};
use crate::domain::checkin::CheckIn;
use crate::domain::credentials::PasswordHash;
use crate::domain::favorite::Favorite;
use crate::domain::photo::BarPhoto;
use crate::domain::review::{Rating, Review};
use crate::domain::user::{Email, User, UserId};

use super::schema::{
    achievements, bar_photos, bars, check_ins, favorites, reviews, user_achievements, users,
};

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub points: i32,
    pub level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::new(row.email).map_err(|err| format!("stored email invalid: {err}"))?;
        Ok(User {
            id: UserId::from_uuid(row.id),
            email,
            password_hash: PasswordHash::from_stored(row.password_hash),
            first_name: row.first_name,
            last_name: row.last_name,
            profile_image_url: row.profile_image_url,
            points: row.points,
            level: row.level,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
}

#[derive(Debug, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = bars)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BarRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub image_url: Option<String>,
    pub hours: Option<Value>,
    pub amenities: Value,
    pub offers_kava: bool,
    pub offers_kratom: bool,
    pub vibe: Option<String>,
    pub is_verified: bool,
    pub average_rating: BigDecimal,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BarRow> for Bar {
    fn from(row: BarRow) -> Self {
        // A malformed amenities payload degrades to an empty list.
        let amenities: Vec<String> = serde_json::from_value(row.amenities).unwrap_or_default();
        Bar {
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            address: row.address,
            city: row.city,
            state: row.state,
            zip_code: row.zip_code,
            latitude: row.latitude,
            longitude: row.longitude,
            phone: row.phone,
            website: row.website,
            image_url: row.image_url,
            hours: row.hours,
            amenities,
            offers_kava: row.offers_kava,
            offers_kratom: row.offers_kratom,
            vibe: row.vibe,
            is_verified: row.is_verified,
            average_rating: row.average_rating,
            review_count: row.review_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = bars)]
pub struct NewBarRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub slug: &'a str,
    pub description: Option<&'a str>,
    pub address: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub zip_code: Option<&'a str>,
    pub latitude: f64,
    pub longitude: f64,
    pub phone: Option<&'a str>,
    pub website: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub hours: Option<&'a Value>,
    pub amenities: &'a Value,
    pub offers_kava: bool,
    pub offers_kratom: bool,
    pub vibe: Option<&'a str>,
}

/// Partial update changeset. `None` fields are left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = bars)]
pub struct BarChangeset {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub image_url: Option<String>,
    pub hours: Option<Value>,
    pub amenities: Option<Value>,
    pub offers_kava: Option<bool>,
    pub offers_kratom: Option<bool>,
    pub vibe: Option<String>,
    pub is_verified: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl BarChangeset {
    pub fn from_update(update: &BarUpdate) -> Self {
        Self {
            name: update.name.clone(),
            description: update.description.clone(),
            address: update.address.clone(),
            city: update.city.clone(),
            state: update.state.clone(),
            zip_code: update.zip_code.clone(),
            latitude: update.latitude,
            longitude: update.longitude,
            phone: update.phone.clone(),
            website: update.website.clone(),
            image_url: update.image_url.clone(),
            hours: update.hours.clone(),
            amenities: update
                .amenities
                .as_ref()
                .map(|list| Value::from(list.clone())),
            offers_kava: update.offers_kava,
            offers_kratom: update.offers_kratom,
            vibe: update.vibe.clone(),
            is_verified: update.is_verified,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReviewRow {
    pub id: Uuid,
    pub bar_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub photo_url: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = String;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let rating =
            Rating::new(row.rating).map_err(|err| format!("stored rating invalid: {err}"))?;
        Ok(Review {
            id: row.id,
            bar_id: row.bar_id,
            user_id: UserId::from_uuid(row.user_id),
            rating,
            comment: row.comment,
            photo_url: row.photo_url,
            is_verified: row.is_verified,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = reviews)]
pub struct NewReviewRow<'a> {
    pub id: Uuid,
    pub bar_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: Option<&'a str>,
    pub photo_url: Option<&'a str>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = check_ins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CheckInRow {
    pub id: Uuid,
    pub bar_id: Uuid,
    pub user_id: Uuid,
    pub note: Option<String>,
    pub photo_url: Option<String>,
    pub points: i32,
    pub created_at: DateTime<Utc>,
}

impl From<CheckInRow> for CheckIn {
    fn from(row: CheckInRow) -> Self {
        CheckIn {
            id: row.id,
            bar_id: row.bar_id,
            user_id: UserId::from_uuid(row.user_id),
            note: row.note,
            photo_url: row.photo_url,
            points: row.points,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = check_ins)]
pub struct NewCheckInRow<'a> {
    pub id: Uuid,
    pub bar_id: Uuid,
    pub user_id: Uuid,
    pub note: Option<&'a str>,
    pub photo_url: Option<&'a str>,
    pub points: i32,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = favorites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FavoriteRow {
    pub id: Uuid,
    pub bar_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<FavoriteRow> for Favorite {
    fn from(row: FavoriteRow) -> Self {
        Favorite {
            id: row.id,
            bar_id: row.bar_id,
            user_id: UserId::from_uuid(row.user_id),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = favorites)]
pub struct NewFavoriteRow {
    pub id: Uuid,
    pub bar_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = bar_photos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BarPhotoRow {
    pub id: Uuid,
    pub bar_id: Uuid,
    pub user_id: Option<Uuid>,
    pub image_url: String,
    pub caption: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<BarPhotoRow> for BarPhoto {
    fn from(row: BarPhotoRow) -> Self {
        BarPhoto {
            id: row.id,
            bar_id: row.bar_id,
            user_id: row.user_id.map(UserId::from_uuid),
            image_url: row.image_url,
            caption: row.caption,
            is_verified: row.is_verified,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = bar_photos)]
pub struct NewBarPhotoRow<'a> {
    pub id: Uuid,
    pub bar_id: Uuid,
    pub user_id: Option<Uuid>,
    pub image_url: &'a str,
    pub caption: Option<&'a str>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = achievements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AchievementRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub points_required: i32,
    pub bars_required: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<AchievementRow> for Achievement {
    fn from(row: AchievementRow) -> Self {
        Achievement {
            id: row.id,
            name: row.name,
            description: row.description,
            icon: row.icon,
            points_required: row.points_required,
            bars_required: row.bars_required,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = user_achievements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserAchievementRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub achievement_id: Uuid,
    pub earned_at: DateTime<Utc>,
}

impl From<UserAchievementRow> for UserAchievement {
    fn from(row: UserAchievementRow) -> Self {
        UserAchievement {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            achievement_id: row.achievement_id,
            earned_at: row.earned_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = user_achievements)]
pub struct NewUserAchievementRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub achievement_id: Uuid,
}
