//! Bar (venue) entity and related value types.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors for bar value types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BarValidationError {
    #[error("latitude must be between -90 and 90")]
    LatitudeOutOfRange,
    #[error("longitude must be between -180 and 180")]
    LongitudeOutOfRange,
    #[error("coordinate must be a finite number")]
    NotFinite,
}

/// A validated WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Validate and construct a coordinate pair.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, BarValidationError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(BarValidationError::NotFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(BarValidationError::LatitudeOutOfRange);
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(BarValidationError::LongitudeOutOfRange);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A kava bar listing.
///
/// `average_rating` and `review_count` are maintained by the review
/// aggregation path and must never be written directly by callers.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
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
    /// JSON object keyed by weekday, e.g. `{"mon": "10:00-22:00"}`.
    #[schema(value_type = Object)]
    pub hours: Option<serde_json::Value>,
    pub amenities: Vec<String>,
    pub offers_kava: bool,
    pub offers_kratom: bool,
    pub vibe: Option<String>,
    pub is_verified: bool,
    /// Numeric(3,2) average of review ratings; serialised as a string.
    #[schema(value_type = String, example = "4.25")]
    pub average_rating: BigDecimal,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bar {
    /// Coordinates of the bar as a validated pair.
    pub fn coordinates(&self) -> Result<Coordinates, BarValidationError> {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Fields required to create a bar. The slug is derived from `name` by the
/// repository and is not supplied by callers.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBar {
    pub name: String,
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
    #[schema(value_type = Option<Object>)]
    pub hours: Option<serde_json::Value>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default = "default_offers_kava")]
    pub offers_kava: bool,
    #[serde(default)]
    pub offers_kratom: bool,
    pub vibe: Option<String>,
}

fn default_offers_kava() -> bool {
    true
}

impl NewBar {
    /// Validate the creation payload.
    pub fn validate(&self) -> Result<(), BarValidationError> {
        Coordinates::new(self.latitude, self.longitude)?;
        Ok(())
    }
}

/// Partial update applied to an existing bar. Absent fields are left
/// untouched. The stored geometry is refreshed only when both coordinates
/// are supplied together; a lone latitude or longitude updates the column
/// but leaves the geometry stale.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BarUpdate {
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
    #[schema(value_type = Option<Object>)]
    pub hours: Option<serde_json::Value>,
    pub amenities: Option<Vec<String>>,
    pub offers_kava: Option<bool>,
    pub offers_kratom: Option<bool>,
    pub vibe: Option<String>,
    pub is_verified: Option<bool>,
}

impl BarUpdate {
    /// True when the update carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.zip_code.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.phone.is_none()
            && self.website.is_none()
            && self.image_url.is_none()
            && self.hours.is_none()
            && self.amenities.is_none()
            && self.offers_kava.is_none()
            && self.offers_kratom.is_none()
            && self.vibe.is_none()
            && self.is_verified.is_none()
    }

    /// Both coordinates supplied, so the geometry can be recomputed.
    pub fn moved(&self) -> Option<Result<Coordinates, BarValidationError>> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        }
    }
}
