//! Wire types for the place provider's JSON API.

use serde::Deserialize;

use crate::domain::bar::Coordinates;
use crate::domain::ports::{Place, PlaceId};

#[derive(Debug, Deserialize)]
pub struct NearbyResponseDto {
    #[serde(default)]
    pub results: Vec<PlaceDto>,
}

#[derive(Debug, Deserialize)]
pub struct DetailsResponseDto {
    pub result: PlaceDto,
}

#[derive(Debug, Deserialize)]
pub struct PlaceDto {
    pub place_id: String,
    pub name: String,
    pub geometry: Option<GeometryDto>,
    #[serde(default)]
    pub types: Vec<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    /// Nearby results carry `vicinity`; detail results carry
    /// `formatted_address`. Either may be present.
    pub vicinity: Option<String>,
    pub formatted_address: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeometryDto {
    pub location: LocationDto,
}

#[derive(Debug, Deserialize)]
pub struct LocationDto {
    pub lat: f64,
    pub lng: f64,
}

impl PlaceDto {
    pub fn into_domain(self) -> Place {
        let location = self
            .geometry
            .and_then(|geometry| {
                Coordinates::new(geometry.location.lat, geometry.location.lng).ok()
            });
        Place {
            id: PlaceId(self.place_id),
            name: self.name,
            location,
            kinds: self.types.into_iter().map(|t| t.to_lowercase()).collect(),
            rating: self.rating,
            user_ratings_total: self.user_ratings_total,
            address: self.formatted_address.or(self.vicinity),
            phone: self.formatted_phone_number,
            website: self.website,
        }
    }
}
